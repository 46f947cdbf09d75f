//! Ticket repository interface

use async_trait::async_trait;

use super::model::{Ticket, TicketStatus, TicketType, TicketWithType};
use crate::domain::DomainResult;

#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// List the ticket type catalog
    async fn find_ticket_types(&self) -> DomainResult<Vec<TicketType>>;

    /// Find the ticket of an enrollment, joined with its type
    async fn find_by_enrollment_id(&self, enrollment_id: i32)
        -> DomainResult<Option<TicketWithType>>;

    /// Find ticket by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Ticket>>;

    /// Find ticket by ID, joined with its type
    async fn find_with_type_by_id(&self, id: i32) -> DomainResult<Option<TicketWithType>>;

    /// Create the ticket of an enrollment. An enrollment holds at most one
    /// ticket; a second create fails with `TicketExists`.
    async fn create(
        &self,
        enrollment_id: i32,
        ticket_type_id: i32,
        status: TicketStatus,
    ) -> DomainResult<Ticket>;

    /// Transition a ticket to PAID
    async fn mark_paid(&self, id: i32) -> DomainResult<()>;
}
