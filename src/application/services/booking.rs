//! Booking orchestration

use std::sync::Arc;

use tracing::{info, warn};

use super::{CapacityEvaluator, EligibilityChecker};
use crate::domain::{
    BlockReason, BlockedAction, Booking, BookingWithRoom, DomainError, DomainResult,
    RepositoryProvider, Room,
};

/// Service for creating and moving room bookings
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    eligibility: EligibilityChecker,
    capacity: CapacityEvaluator,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            eligibility: EligibilityChecker::new(repos.clone()),
            capacity: CapacityEvaluator::new(repos.clone()),
            repos,
        }
    }

    /// The caller's booking with its room
    pub async fn get_booking(&self, user_id: i32) -> DomainResult<BookingWithRoom> {
        self.repos
            .bookings()
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "user_id", user_id))
    }

    /// Book a room for an eligible user
    pub async fn book_room(&self, user_id: i32, room_id: i32) -> DomainResult<Booking> {
        let result = self.try_book_room(user_id, room_id).await;
        record_outcome("book", &result);
        match &result {
            Ok(booking) => info!(user_id, room_id, booking_id = booking.id, "Room booked"),
            Err(e) => warn!(user_id, room_id, error = %e, "Booking rejected"),
        }
        result
    }

    /// Move the caller's booking to another room
    pub async fn change_booking_room(&self, user_id: i32, room_id: i32) -> DomainResult<Booking> {
        let result = self.try_change_booking_room(user_id, room_id).await;
        record_outcome("change", &result);
        match &result {
            Ok(booking) => info!(user_id, room_id, booking_id = booking.id, "Booking moved"),
            Err(e) => warn!(user_id, room_id, error = %e, "Room change rejected"),
        }
        result
    }

    async fn try_book_room(&self, user_id: i32, room_id: i32) -> DomainResult<Booking> {
        ensure_room_id(room_id)?;

        self.eligibility
            .check_hotel_eligibility(user_id)
            .await
            .map_err(|e| e.relabel(BlockedAction::Book, true))?;

        let room = self.find_room(room_id).await?;
        if !self.capacity.has_capacity(&room, None).await? {
            return Err(room_full());
        }

        self.repos.bookings().create(user_id, &room).await
    }

    async fn try_change_booking_room(&self, user_id: i32, room_id: i32) -> DomainResult<Booking> {
        ensure_room_id(room_id)?;

        let room = self.find_room(room_id).await?;
        if !self.capacity.has_capacity(&room, Some(user_id)).await? {
            return Err(room_full());
        }

        let current = self
            .repos
            .bookings()
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "user_id", user_id))?;
        if !current.booking.is_owned_by(user_id) {
            return Err(DomainError::blocked(
                BlockedAction::Book,
                BlockReason::NotBookingOwner,
            ));
        }

        self.repos.bookings().upsert_by_user_id(user_id, &room).await
    }

    async fn find_room(&self, room_id: i32) -> DomainResult<Room> {
        self.repos
            .rooms()
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room", "id", room_id))
    }
}

fn ensure_room_id(room_id: i32) -> DomainResult<()> {
    if room_id <= 0 {
        return Err(DomainError::BadRequest(format!(
            "room_id must be a positive integer, got {room_id}"
        )));
    }
    Ok(())
}

fn room_full() -> DomainError {
    DomainError::blocked(BlockedAction::Book, BlockReason::RoomFull)
}

fn record_outcome(operation: &'static str, result: &DomainResult<Booking>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.name(),
    };
    metrics::counter!("eventhub_booking_requests_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
}
