//! Hotel queries, gated by hotel eligibility

use std::sync::Arc;

use super::EligibilityChecker;
use crate::domain::{
    BlockedAction, DomainError, DomainResult, Hotel, HotelWithRooms, RepositoryProvider,
};

pub struct HotelService {
    repos: Arc<dyn RepositoryProvider>,
    eligibility: EligibilityChecker,
}

impl HotelService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            eligibility: EligibilityChecker::new(repos.clone()),
            repos,
        }
    }

    /// All hotels, for users allowed to stay in one
    pub async fn get_hotels(&self, user_id: i32) -> DomainResult<Vec<Hotel>> {
        self.gate(user_id).await?;

        let hotels = self.repos.hotels().find_all().await?;
        if hotels.is_empty() {
            return Err(DomainError::not_found("Hotel", "id", "*"));
        }
        Ok(hotels)
    }

    pub async fn get_hotel_with_rooms(
        &self,
        user_id: i32,
        hotel_id: i32,
    ) -> DomainResult<HotelWithRooms> {
        self.gate(user_id).await?;

        self.repos
            .hotels()
            .find_with_rooms_by_id(hotel_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Hotel", "id", hotel_id))
    }

    // A missing enrollment stays NotFound here; every other rule failure
    // reads as CannotListHotels.
    async fn gate(&self, user_id: i32) -> DomainResult<()> {
        self.eligibility
            .check_hotel_eligibility(user_id)
            .await
            .map(|_| ())
            .map_err(|e| e.relabel(BlockedAction::ListHotels, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::fixtures::Fixture;
    use crate::domain::BlockReason;

    #[tokio::test]
    async fn eligible_user_lists_hotels() {
        let fx = Fixture::new();
        fx.eligible_user(1);
        let service = HotelService::new(fx.provider());

        let hotels = service.get_hotels(1).await.unwrap();
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].name, "Driven Resort");
    }

    #[tokio::test]
    async fn missing_enrollment_stays_not_found() {
        let fx = Fixture::new();
        let service = HotelService::new(fx.provider());

        let err = service.get_hotels(1).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Enrollment", .. }));
    }

    #[tokio::test]
    async fn rule_failures_become_cannot_list_hotels() {
        let cases = [
            (false, false, true, BlockReason::TicketNotPaid),
            (true, true, true, BlockReason::RemoteTicket),
            (true, false, false, BlockReason::HotelNotIncluded),
        ];
        for (paid, remote, hotel, reason) in cases {
            let fx = Fixture::new();
            let enrollment_id = fx.enroll(1);
            fx.ticket(enrollment_id, paid, remote, hotel);
            let service = HotelService::new(fx.provider());

            let err = service.get_hotels(1).await.unwrap_err();
            assert_eq!(err, DomainError::blocked(BlockedAction::ListHotels, reason));
            assert_eq!(err.name(), "CannotListHotelsError");

            let err = service.get_hotel_with_rooms(1, 1).await.unwrap_err();
            assert_eq!(err, DomainError::blocked(BlockedAction::ListHotels, reason));
        }
    }

    #[tokio::test]
    async fn no_ticket_becomes_cannot_list_hotels() {
        let fx = Fixture::new();
        fx.enroll(1);
        let service = HotelService::new(fx.provider());

        let err = service.get_hotels(1).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::blocked(BlockedAction::ListHotels, BlockReason::NoTicket)
        );
    }

    #[tokio::test]
    async fn empty_catalog_is_not_found() {
        let fx = Fixture::without_hotels();
        fx.eligible_user(1);
        let service = HotelService::new(fx.provider());

        let err = service.get_hotels(1).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Hotel", .. }));
    }

    #[tokio::test]
    async fn hotel_with_rooms_lists_rooms() {
        let fx = Fixture::new();
        fx.eligible_user(1);
        let a = fx.room(1);
        let b = fx.room(3);
        let service = HotelService::new(fx.provider());

        let found = service.get_hotel_with_rooms(1, 1).await.unwrap();
        assert_eq!(found.rooms, vec![a, b]);

        let err = service.get_hotel_with_rooms(1, 42).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Hotel", .. }));
    }
}
