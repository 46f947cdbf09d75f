//! One ticket per enrollment

use sea_orm_migration::prelude::*;

use super::m20240101_000003_create_tickets::Tickets;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_tickets_enrollment_id")
                    .table(Tickets::Table)
                    .to_owned(),
            )
            .await?;

        // Fails on a database that already holds duplicate tickets.
        manager
            .create_index(
                Index::create()
                    .name("idx_tickets_enrollment_id_unique")
                    .table(Tickets::Table)
                    .col(Tickets::EnrollmentId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_tickets_enrollment_id_unique")
                    .table(Tickets::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tickets_enrollment_id")
                    .table(Tickets::Table)
                    .col(Tickets::EnrollmentId)
                    .to_owned(),
            )
            .await
    }
}
