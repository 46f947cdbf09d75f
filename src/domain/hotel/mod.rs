//! Hotel aggregate
//!
//! Hotels and their rooms. Rooms carry the capacity used by bookings.

pub mod model;
pub mod repository;

pub use model::{Hotel, HotelWithRooms, Room};
pub use repository::{HotelRepository, RoomRepository};
