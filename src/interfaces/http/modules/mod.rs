//! HTTP feature modules

pub mod bookings;
pub mod health;
pub mod hotels;
pub mod metrics;
pub mod payments;
pub mod request_id;
pub mod tickets;
