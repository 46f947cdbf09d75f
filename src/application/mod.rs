//! Application layer: eligibility, capacity and booking orchestration

pub mod services;

pub use services::{
    BookingService, CapacityEvaluator, EligibilityChecker, HotelService, PaymentService,
    Services, TicketService,
};
