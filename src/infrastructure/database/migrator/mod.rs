//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_enrollments;
mod m20240101_000002_create_addresses;
mod m20240101_000003_create_tickets;
mod m20240101_000004_create_hotels;
mod m20240101_000005_create_bookings;
mod m20240101_000006_create_payments;
mod m20240101_000007_unique_ticket_per_enrollment;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_enrollments::Migration),
            Box::new(m20240101_000002_create_addresses::Migration),
            Box::new(m20240101_000003_create_tickets::Migration),
            Box::new(m20240101_000004_create_hotels::Migration),
            Box::new(m20240101_000005_create_bookings::Migration),
            Box::new(m20240101_000006_create_payments::Migration),
            Box::new(m20240101_000007_unique_ticket_per_enrollment::Migration),
        ]
    }
}
