//! SeaORM implementation of PaymentRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

use super::db_err;
use crate::domain::payment::{NewPayment, Payment, PaymentRepository};
use crate::domain::{DomainError, DomainResult, TicketStatus};
use crate::infrastructure::database::entities::{payment, ticket};

pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: payment::Model) -> Payment {
    Payment {
        id: m.id,
        ticket_id: m.ticket_id,
        value: m.value,
        card_issuer: m.card_issuer,
        card_last_digits: m.card_last_digits,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn find_by_ticket_id(&self, ticket_id: i32) -> DomainResult<Option<Payment>> {
        let model = payment::Entity::find()
            .filter(payment::Column::TicketId.eq(ticket_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn create_and_mark_paid(&self, p: NewPayment) -> DomainResult<Payment> {
        debug!("Saving payment for ticket {}", p.ticket_id);

        let now = Utc::now();
        let txn = self.db.begin().await.map_err(db_err)?;

        // Ticket first: on SQLite this takes the write lock before any read.
        let paid = ticket::Entity::update_many()
            .col_expr(ticket::Column::Status, Expr::value(TicketStatus::Paid.as_str()))
            .col_expr(ticket::Column::UpdatedAt, Expr::value(now))
            .filter(ticket::Column::Id.eq(p.ticket_id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        if paid.rows_affected == 0 {
            return Err(DomainError::not_found("Ticket", "id", p.ticket_id));
        }

        let model = payment::ActiveModel {
            ticket_id: Set(p.ticket_id),
            value: Set(p.value),
            card_issuer: Set(p.card_issuer),
            card_last_digits: Set(p.card_last_digits),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let inserted = model.insert(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }
}
