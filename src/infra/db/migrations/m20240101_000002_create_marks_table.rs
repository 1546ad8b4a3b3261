//! Migration: Create marks table with one mark per habit and day.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_habits_table::Habits;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Marks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Marks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Marks::HabitId).integer().not_null())
                    .col(ColumnDef::new(Marks::Date).string_len(10).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_marks_habit_id")
                            .from(Marks::Table, Marks::HabitId)
                            .to(Habits::Table, Habits::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Backs the "already marked" check in mark-today
        manager
            .create_index(
                Index::create()
                    .name("idx_marks_habit_id_date")
                    .table(Marks::Table)
                    .col(Marks::HabitId)
                    .col(Marks::Date)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_marks_habit_id_date")
                    .table(Marks::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Marks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Marks {
    Table,
    Id,
    HabitId,
    Date,
}
