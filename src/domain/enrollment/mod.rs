//! Enrollment aggregate
//!
//! A user's registration record, the anchor for tickets and bookings.

pub mod model;
pub mod repository;

pub use model::{Address, Enrollment};
pub use repository::EnrollmentRepository;
