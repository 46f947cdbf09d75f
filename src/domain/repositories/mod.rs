//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::booking::BookingRepository;
use super::enrollment::EnrollmentRepository;
use super::hotel::{HotelRepository, RoomRepository};
use super::payment::PaymentRepository;
use super::ticket::TicketRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let enrollment = repos.enrollments().find_by_user_id(1).await?;
///     let bookings = repos.bookings().find_by_room_id(3).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn enrollments(&self) -> &dyn EnrollmentRepository;
    fn tickets(&self) -> &dyn TicketRepository;
    fn hotels(&self) -> &dyn HotelRepository;
    fn rooms(&self) -> &dyn RoomRepository;
    fn bookings(&self) -> &dyn BookingRepository;
    fn payments(&self) -> &dyn PaymentRepository;
}
