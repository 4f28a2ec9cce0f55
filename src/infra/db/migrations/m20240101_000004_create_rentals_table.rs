//! Migration: Create rentals table.
//!
//! User and vehicle are stored as plain identifiers, without foreign keys.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rentals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rentals::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rentals::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Rentals::VehicleId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Rentals::BookingDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Rentals::StartDate).timestamp().not_null())
                    .col(ColumnDef::new(Rentals::EndDate).timestamp().not_null())
                    .col(ColumnDef::new(Rentals::TotalCost).decimal_len(10, 2).null())
                    .col(ColumnDef::new(Rentals::PickupLocation).string().null())
                    .col(
                        ColumnDef::new(Rentals::Status)
                            .string_len(16)
                            .not_null()
                            .default("PENDING"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rentals_status_booking_date")
                    .table(Rentals::Table)
                    .col(Rentals::Status)
                    .col(Rentals::BookingDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rentals::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Rentals {
    Table,
    Id,
    UserId,
    VehicleId,
    BookingDate,
    StartDate,
    EndDate,
    TotalCost,
    PickupLocation,
    Status,
}
