//! Hotel eligibility rules

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    BlockReason, BlockedAction, DomainError, DomainResult, RepositoryProvider, TicketWithType,
};

/// Decides whether a user may see hotels and book rooms.
///
/// Order of checks: enrollment exists, a ticket exists, the ticket is paid,
/// not remote and includes a hotel. Failures after the enrollment lookup are
/// `Blocked { action: Proceed, .. }`; callers relabel them.
pub struct EligibilityChecker {
    repos: Arc<dyn RepositoryProvider>,
}

impl EligibilityChecker {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn check_hotel_eligibility(&self, user_id: i32) -> DomainResult<TicketWithType> {
        let enrollment = self
            .repos
            .enrollments()
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Enrollment", "user_id", user_id))?;

        let ticket = self
            .repos
            .tickets()
            .find_by_enrollment_id(enrollment.id)
            .await?
            .ok_or_else(|| DomainError::blocked(BlockedAction::Proceed, BlockReason::NoTicket))?;

        if let Err(reason) = ticket.hotel_eligibility() {
            debug!(user_id, ticket_id = ticket.ticket.id, %reason, "Hotel access denied");
            return Err(DomainError::blocked(BlockedAction::Proceed, reason));
        }

        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::fixtures::Fixture;

    #[tokio::test]
    async fn missing_enrollment_is_not_found() {
        let fx = Fixture::new();
        let checker = EligibilityChecker::new(fx.provider());

        let err = checker.check_hotel_eligibility(1).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Enrollment", .. }));
    }

    #[tokio::test]
    async fn missing_ticket_blocks() {
        let fx = Fixture::new();
        fx.enroll(1);
        let checker = EligibilityChecker::new(fx.provider());

        let err = checker.check_hotel_eligibility(1).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::blocked(BlockedAction::Proceed, BlockReason::NoTicket)
        );
    }

    #[tokio::test]
    async fn each_ticket_rule_reports_its_reason() {
        let cases = [
            (false, false, true, BlockReason::TicketNotPaid),
            (true, true, true, BlockReason::RemoteTicket),
            (true, false, false, BlockReason::HotelNotIncluded),
        ];
        for (paid, remote, hotel, reason) in cases {
            let fx = Fixture::new();
            let enrollment_id = fx.enroll(1);
            fx.ticket(enrollment_id, paid, remote, hotel);
            let checker = EligibilityChecker::new(fx.provider());

            let err = checker.check_hotel_eligibility(1).await.unwrap_err();
            assert_eq!(err, DomainError::blocked(BlockedAction::Proceed, reason));
        }
    }

    #[tokio::test]
    async fn eligible_user_gets_ticket_back() {
        let fx = Fixture::new();
        let ticket_id = fx.eligible_user(1);
        let checker = EligibilityChecker::new(fx.provider());

        let ticket = checker.check_hotel_eligibility(1).await.unwrap();
        assert_eq!(ticket.ticket.id, ticket_id);
    }
}
