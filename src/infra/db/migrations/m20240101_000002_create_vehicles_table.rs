//! Migration: Create vehicles table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vehicles::Name).string().not_null())
                    .col(ColumnDef::new(Vehicles::Model).string().null())
                    .col(ColumnDef::new(Vehicles::Number).string().null().unique_key())
                    .col(ColumnDef::new(Vehicles::RentCost).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Vehicles::VehicleType).string_len(8).not_null())
                    .col(
                        ColumnDef::new(Vehicles::Available)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Vehicles::Damaged)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vehicles_type_available")
                    .table(Vehicles::Table)
                    .col(Vehicles::VehicleType)
                    .col(Vehicles::Available)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Vehicles {
    Table,
    Id,
    Name,
    Model,
    Number,
    RentCost,
    VehicleType,
    Available,
    Damaged,
}
