//! SeaORM implementation of TicketRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};

use super::db_err;
use crate::domain::ticket::{Ticket, TicketRepository, TicketStatus, TicketType, TicketWithType};
use crate::domain::{BlockReason, BlockedAction, DomainError, DomainResult};
use crate::infrastructure::database::entities::{ticket, ticket_type};

pub struct SeaOrmTicketRepository {
    db: DatabaseConnection,
}

impl SeaOrmTicketRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn type_to_domain(m: ticket_type::Model) -> TicketType {
    TicketType {
        id: m.id,
        name: m.name,
        price: m.price,
        is_remote: m.is_remote,
        includes_hotel: m.includes_hotel,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn model_to_domain(m: ticket::Model) -> DomainResult<Ticket> {
    let status = TicketStatus::from_str(&m.status).ok_or_else(|| {
        DomainError::Storage(format!("ticket {} has unknown status {}", m.id, m.status))
    })?;
    Ok(Ticket {
        id: m.id,
        ticket_type_id: m.ticket_type_id,
        enrollment_id: m.enrollment_id,
        status,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn joined_to_domain(
    (t, tt): (ticket::Model, Option<ticket_type::Model>),
) -> DomainResult<TicketWithType> {
    let ticket_type = tt
        .map(type_to_domain)
        .ok_or_else(|| DomainError::not_found("TicketType", "id", t.ticket_type_id))?;
    Ok(TicketWithType {
        ticket: model_to_domain(t)?,
        ticket_type,
    })
}

/// `tickets.enrollment_id` is unique; a losing concurrent insert lands here.
fn insert_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::blocked(BlockedAction::Proceed, BlockReason::TicketExists)
        }
        _ => db_err(e),
    }
}

// ── TicketRepository impl ───────────────────────────────────────

#[async_trait]
impl TicketRepository for SeaOrmTicketRepository {
    async fn find_ticket_types(&self) -> DomainResult<Vec<TicketType>> {
        let models = ticket_type::Entity::find()
            .order_by_asc(ticket_type::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(type_to_domain).collect())
    }

    async fn find_by_enrollment_id(
        &self,
        enrollment_id: i32,
    ) -> DomainResult<Option<TicketWithType>> {
        let row = ticket::Entity::find()
            .filter(ticket::Column::EnrollmentId.eq(enrollment_id))
            .order_by_asc(ticket::Column::Id)
            .find_also_related(ticket_type::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        row.map(joined_to_domain).transpose()
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Ticket>> {
        let model = ticket::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_with_type_by_id(&self, id: i32) -> DomainResult<Option<TicketWithType>> {
        let row = ticket::Entity::find_by_id(id)
            .find_also_related(ticket_type::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        row.map(joined_to_domain).transpose()
    }

    async fn create(
        &self,
        enrollment_id: i32,
        ticket_type_id: i32,
        status: TicketStatus,
    ) -> DomainResult<Ticket> {
        debug!(
            "Creating ticket: enrollment={} type={}",
            enrollment_id, ticket_type_id
        );

        let exists = ticket_type::Entity::find_by_id(ticket_type_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if exists.is_none() {
            return Err(DomainError::not_found("TicketType", "id", ticket_type_id));
        }

        let now = Utc::now();
        let model = ticket::ActiveModel {
            ticket_type_id: Set(ticket_type_id),
            enrollment_id: Set(enrollment_id),
            status: Set(status.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let inserted = model.insert(&self.db).await.map_err(insert_err)?;
        model_to_domain(inserted)
    }

    async fn mark_paid(&self, id: i32) -> DomainResult<()> {
        debug!("Marking ticket {} as paid", id);

        let existing = ticket::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("Ticket", "id", id));
        };

        let mut active: ticket::ActiveModel = existing.into();
        active.status = Set(TicketStatus::Paid.as_str().to_string());
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
