//! Domain layer: entities and per-aggregate repository interfaces.

pub mod booking;
pub mod enrollment;
pub mod hotel;
pub mod payment;
pub mod repositories;
pub mod ticket;

pub use booking::{Booking, BookingRepository, BookingWithRoom};
pub use enrollment::{Address, Enrollment, EnrollmentRepository};
pub use hotel::{Hotel, HotelRepository, HotelWithRooms, Room, RoomRepository};
pub use payment::{CardData, NewPayment, Payment, PaymentRepository};
pub use repositories::{DomainResult, RepositoryProvider};
pub use ticket::{Ticket, TicketRepository, TicketStatus, TicketType, TicketWithType};

pub use crate::shared::errors::{BlockReason, BlockedAction, DomainError};
