//! Hotel and room repository interfaces

use async_trait::async_trait;

use super::model::{Hotel, HotelWithRooms, Room};
use crate::domain::DomainResult;

#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// List all hotels
    async fn find_all(&self) -> DomainResult<Vec<Hotel>>;

    /// Find a hotel together with its rooms
    async fn find_with_rooms_by_id(&self, hotel_id: i32) -> DomainResult<Option<HotelWithRooms>>;
}

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Find room by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>>;
}
