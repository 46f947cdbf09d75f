//! Application services

mod booking;
mod capacity;
mod eligibility;
mod hotel;
mod payment;
mod ticket;

#[cfg(test)]
pub(crate) mod fixtures;

use std::sync::Arc;

use crate::domain::RepositoryProvider;

pub use booking::BookingService;
pub use capacity::CapacityEvaluator;
pub use eligibility::EligibilityChecker;
pub use hotel::HotelService;
pub use payment::PaymentService;
pub use ticket::TicketService;

/// All services wired over one repository provider
#[derive(Clone)]
pub struct Services {
    pub bookings: Arc<BookingService>,
    pub hotels: Arc<HotelService>,
    pub tickets: Arc<TicketService>,
    pub payments: Arc<PaymentService>,
}

impl Services {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            bookings: Arc::new(BookingService::new(repos.clone())),
            hotels: Arc::new(HotelService::new(repos.clone())),
            tickets: Arc::new(TicketService::new(repos.clone())),
            payments: Arc::new(PaymentService::new(repos)),
        }
    }
}
