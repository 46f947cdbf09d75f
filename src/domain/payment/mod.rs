//! Payment aggregate

pub mod model;
pub mod repository;

pub use model::{CardData, NewPayment, Payment};
pub use repository::PaymentRepository;
