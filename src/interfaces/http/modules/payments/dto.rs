//! Payment DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{CardData, Payment};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentDto {
    pub id: i32,
    pub ticket_id: i32,
    /// Amount paid in cents
    pub value: i32,
    pub card_issuer: String,
    pub card_last_digits: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Payment> for PaymentDto {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            ticket_id: p.ticket_id,
            value: p.value,
            card_issuer: p.card_issuer,
            card_last_digits: p.card_last_digits,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PaymentQuery {
    /// Ticket to look up
    pub ticket_id: Option<i32>,
}

/// Card details; only the issuer and last digits are stored
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CardDataRequest {
    #[validate(length(min = 1))]
    pub issuer: String,
    #[validate(length(min = 4, max = 19))]
    pub number: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub expiration_date: String,
    #[validate(length(min = 3, max = 4))]
    pub cvv: String,
}

impl From<CardDataRequest> for CardData {
    fn from(c: CardDataRequest) -> Self {
        Self {
            issuer: c.issuer,
            number: c.number,
            name: c.name,
            expiration_date: c.expiration_date,
            cvv: c.cvv,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProcessPaymentRequest {
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub ticket_id: i32,
    #[validate(nested)]
    pub card_data: CardDataRequest,
}
