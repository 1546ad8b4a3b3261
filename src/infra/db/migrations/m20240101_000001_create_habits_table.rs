//! Migration: Create habits table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Habits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Habits::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Habits::Name).string().not_null())
                    .col(ColumnDef::new(Habits::Notes).text().null())
                    .col(
                        ColumnDef::new(Habits::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Habits::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Habits {
    Table,
    Id,
    Name,
    Notes,
    CreatedAt,
}
