//! Ticket aggregate
//!
//! Contains tickets, the ticket type catalog and the repository interface.

pub mod model;
pub mod repository;

pub use model::{Ticket, TicketStatus, TicketType, TicketWithType};
pub use repository::TicketRepository;
