//! Payment repository interface

use async_trait::async_trait;

use super::model::{NewPayment, Payment};
use crate::domain::DomainResult;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Find the payment made for a ticket
    async fn find_by_ticket_id(&self, ticket_id: i32) -> DomainResult<Option<Payment>>;

    /// Record the payment and move its ticket to PAID as one unit. Either
    /// both writes land or neither does; an unknown ticket is `NotFound`.
    async fn create_and_mark_paid(&self, payment: NewPayment) -> DomainResult<Payment>;
}
