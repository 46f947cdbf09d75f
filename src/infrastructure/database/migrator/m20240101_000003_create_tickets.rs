//! Create ticket_types and tickets tables

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_enrollments::Enrollments;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TicketTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TicketTypes::Name).string().not_null())
                    .col(ColumnDef::new(TicketTypes::Price).integer().not_null())
                    .col(
                        ColumnDef::new(TicketTypes::IsRemote)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(TicketTypes::IncludesHotel)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(TicketTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TicketTypes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tickets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tickets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tickets::TicketTypeId).integer().not_null())
                    .col(ColumnDef::new(Tickets::EnrollmentId).integer().not_null())
                    .col(
                        ColumnDef::new(Tickets::Status)
                            .string()
                            .not_null()
                            .default("RESERVED"),
                    )
                    .col(
                        ColumnDef::new(Tickets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tickets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_ticket_type")
                            .from(Tickets::Table, Tickets::TicketTypeId)
                            .to(TicketTypes::Table, TicketTypes::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_enrollment")
                            .from(Tickets::Table, Tickets::EnrollmentId)
                            .to(Enrollments::Table, Enrollments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
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

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tickets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TicketTypes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum TicketTypes {
    Table,
    Id,
    Name,
    Price,
    IsRemote,
    IncludesHotel,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum Tickets {
    Table,
    Id,
    TicketTypeId,
    EnrollmentId,
    Status,
    CreatedAt,
    UpdatedAt,
}
