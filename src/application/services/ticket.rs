//! Ticket catalog and purchase

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, Enrollment, RepositoryProvider, TicketStatus, TicketType,
    TicketWithType,
};

pub struct TicketService {
    repos: Arc<dyn RepositoryProvider>,
}

impl TicketService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn get_ticket_types(&self) -> DomainResult<Vec<TicketType>> {
        let types = self.repos.tickets().find_ticket_types().await?;
        if types.is_empty() {
            return Err(DomainError::not_found("TicketType", "id", "*"));
        }
        Ok(types)
    }

    /// The caller's ticket joined with its type
    pub async fn get_ticket_by_user_id(&self, user_id: i32) -> DomainResult<TicketWithType> {
        let enrollment = self.enrollment_of(user_id).await?;

        self.repos
            .tickets()
            .find_by_enrollment_id(enrollment.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Ticket", "enrollment_id", enrollment.id))
    }

    /// Reserve a ticket of `ticket_type_id` for the caller. An enrollment
    /// holds one ticket; asking again is `TicketExists`.
    pub async fn create_ticket(
        &self,
        user_id: i32,
        ticket_type_id: i32,
    ) -> DomainResult<TicketWithType> {
        let enrollment = self.enrollment_of(user_id).await?;

        let ticket = self
            .repos
            .tickets()
            .create(enrollment.id, ticket_type_id, TicketStatus::Reserved)
            .await?;
        info!(user_id, ticket_id = ticket.id, ticket_type_id, "Ticket reserved");

        self.repos
            .tickets()
            .find_with_type_by_id(ticket.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Ticket", "id", ticket.id))
    }

    async fn enrollment_of(&self, user_id: i32) -> DomainResult<Enrollment> {
        self.repos
            .enrollments()
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Enrollment", "user_id", user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::fixtures::Fixture;
    use crate::domain::{BlockReason, BlockedAction};

    #[tokio::test]
    async fn empty_catalog_is_not_found() {
        let fx = Fixture::new();
        let service = TicketService::new(fx.provider());

        let err = service.get_ticket_types().await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn catalog_is_listed_in_id_order() {
        let fx = Fixture::new();
        let online = fx.ticket_type(true, false, 10000);
        let onsite = fx.ticket_type(false, true, 60000);
        let service = TicketService::new(fx.provider());

        let ids: Vec<i32> = service
            .get_ticket_types()
            .await
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![online, onsite]);
    }

    #[tokio::test]
    async fn ticket_lookup_requires_enrollment_then_ticket() {
        let fx = Fixture::new();
        let service = TicketService::new(fx.provider());

        let err = service.get_ticket_by_user_id(1).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Enrollment", .. }));

        fx.enroll(1);
        let err = service.get_ticket_by_user_id(1).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Ticket", .. }));
    }

    #[tokio::test]
    async fn created_ticket_is_reserved_and_joined() {
        let fx = Fixture::new();
        let enrollment_id = fx.enroll(1);
        let type_id = fx.ticket_type(false, true, 60000);
        let service = TicketService::new(fx.provider());

        let created = service.create_ticket(1, type_id).await.unwrap();
        assert_eq!(created.ticket.status, TicketStatus::Reserved);
        assert_eq!(created.ticket.enrollment_id, enrollment_id);
        assert_eq!(created.ticket_type.price, 60000);

        let fetched = service.get_ticket_by_user_id(1).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_without_enrollment_is_not_found() {
        let fx = Fixture::new();
        let type_id = fx.ticket_type(false, true, 60000);
        let service = TicketService::new(fx.provider());

        let err = service.create_ticket(1, type_id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Enrollment", .. }));
    }

    #[tokio::test]
    async fn second_ticket_is_rejected_and_first_kept() {
        let fx = Fixture::new();
        fx.enroll(1);
        let online = fx.ticket_type(true, false, 10000);
        let onsite = fx.ticket_type(false, true, 60000);
        let service = TicketService::new(fx.provider());

        let first = service.create_ticket(1, online).await.unwrap();
        let err = service.create_ticket(1, onsite).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::blocked(BlockedAction::Proceed, BlockReason::TicketExists)
        );

        let held = service.get_ticket_by_user_id(1).await.unwrap();
        assert_eq!(held.ticket.id, first.ticket.id);
        assert_eq!(held.ticket_type.id, online);
    }

    #[tokio::test]
    async fn concurrent_creates_leave_one_ticket() {
        let fx = Fixture::new();
        fx.enroll(1);
        let type_id = fx.ticket_type(false, true, 60000);
        let service = Arc::new(TicketService::new(fx.provider()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.create_ticket(1, type_id).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(err) => assert_eq!(
                    err,
                    DomainError::blocked(BlockedAction::Proceed, BlockReason::TicketExists)
                ),
            }
        }
        assert_eq!(created, 1);
    }
}
