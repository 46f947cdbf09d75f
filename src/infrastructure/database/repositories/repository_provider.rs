//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::booking::BookingRepository;
use crate::domain::enrollment::EnrollmentRepository;
use crate::domain::hotel::{HotelRepository, RoomRepository};
use crate::domain::payment::PaymentRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::ticket::TicketRepository;

use super::booking_repository::SeaOrmBookingRepository;
use super::enrollment_repository::SeaOrmEnrollmentRepository;
use super::hotel_repository::{SeaOrmHotelRepository, SeaOrmRoomRepository};
use super::payment_repository::SeaOrmPaymentRepository;
use super::ticket_repository::SeaOrmTicketRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let enrollment = repos.enrollments().find_by_user_id(1).await?;
/// let booking = repos.bookings().find_by_user_id(1).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    enrollments: SeaOrmEnrollmentRepository,
    tickets: SeaOrmTicketRepository,
    hotels: SeaOrmHotelRepository,
    rooms: SeaOrmRoomRepository,
    bookings: SeaOrmBookingRepository,
    payments: SeaOrmPaymentRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            enrollments: SeaOrmEnrollmentRepository::new(db.clone()),
            tickets: SeaOrmTicketRepository::new(db.clone()),
            hotels: SeaOrmHotelRepository::new(db.clone()),
            rooms: SeaOrmRoomRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone()),
            payments: SeaOrmPaymentRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn enrollments(&self) -> &dyn EnrollmentRepository {
        &self.enrollments
    }

    fn tickets(&self) -> &dyn TicketRepository {
        &self.tickets
    }

    fn hotels(&self) -> &dyn HotelRepository {
        &self.hotels
    }

    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }
}
