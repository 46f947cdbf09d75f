//! Ticket DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{TicketType, TicketWithType};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TicketTypeDto {
    pub id: i32,
    pub name: String,
    /// Price in cents
    pub price: i32,
    pub is_remote: bool,
    pub includes_hotel: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<TicketType> for TicketTypeDto {
    fn from(t: TicketType) -> Self {
        Self {
            id: t.id,
            name: t.name,
            price: t.price,
            is_remote: t.is_remote,
            includes_hotel: t.includes_hotel,
            created_at: t.created_at.to_rfc3339(),
            updated_at: t.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TicketDto {
    pub id: i32,
    /// `RESERVED` or `PAID`
    pub status: String,
    pub ticket_type_id: i32,
    pub enrollment_id: i32,
    pub ticket_type: TicketTypeDto,
    pub created_at: String,
    pub updated_at: String,
}

impl From<TicketWithType> for TicketDto {
    fn from(t: TicketWithType) -> Self {
        Self {
            id: t.ticket.id,
            status: t.ticket.status.as_str().to_string(),
            ticket_type_id: t.ticket.ticket_type_id,
            enrollment_id: t.ticket.enrollment_id,
            ticket_type: t.ticket_type.into(),
            created_at: t.ticket.created_at.to_rfc3339(),
            updated_at: t.ticket.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTicketRequest {
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub ticket_type_id: i32,
}
