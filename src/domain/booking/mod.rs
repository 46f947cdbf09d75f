//! Booking aggregate
//!
//! Contains the Booking entity and its capacity-guarded repository interface.

pub mod model;
pub mod repository;

pub use model::{count_occupants, Booking, BookingWithRoom};
pub use repository::BookingRepository;
