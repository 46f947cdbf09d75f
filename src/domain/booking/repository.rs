//! Booking repository interface

use async_trait::async_trait;

use super::model::{Booking, BookingWithRoom};
use crate::domain::hotel::Room;
use crate::domain::DomainResult;

/// Booking persistence.
///
/// `create` and `upsert_by_user_id` are capacity-guarded writes: each runs the
/// room recount and the write as one atomic unit and fails with
/// `DomainError::Blocked { action: Book, reason: RoomFull }` when the room is
/// already at `room.capacity`. The caller's own booking never counts against
/// an upsert.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find the booking held by a user, joined with its room
    async fn find_by_user_id(&self, user_id: i32) -> DomainResult<Option<BookingWithRoom>>;

    /// Find all bookings referencing a room
    async fn find_by_room_id(&self, room_id: i32) -> DomainResult<Vec<Booking>>;

    /// Create a booking. Fails with `AlreadyBooked` if the user holds one.
    async fn create(&self, user_id: i32, room: &Room) -> DomainResult<Booking>;

    /// Create or move the booking keyed by `user_id` in one write
    async fn upsert_by_user_id(&self, user_id: i32, room: &Room) -> DomainResult<Booking>;
}
