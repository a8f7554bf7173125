//! Repairs the `date` column on pre-existing installs.
//!
//! Early versions stored expenses without a date. Two cases to cover:
//!
//! - an `expenses` table created before the column existed (and before this
//!   migration history): the column must be added;
//! - rows whose `date` is NULL or empty: they must be stamped so every
//!   persisted record carries a date.

use sea_orm::{ConnectionTrait, Statement};
use sea_orm_migration::prelude::*;

use chrono::Local;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Expenses {
    Table,
    Date,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The guard keeps a forced re-run harmless: adding a column that is
        // already there would fail the whole migration.
        if !manager.has_column("expenses", "date").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Expenses::Table)
                        .add_column(ColumnDef::new(Expenses::Date).string())
                        .to_owned(),
                )
                .await?;
        }

        backfill_missing_dates(manager).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Expenses::Table)
                    .drop_column(Expenses::Date)
                    .to_owned(),
            )
            .await
    }
}

/// Stamp legacy rows with today's calendar date, one consistent value for the
/// whole batch. Today keeps the rows valid without fabricating a historical
/// date nobody recorded.
async fn backfill_missing_dates(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let db = manager.get_connection();
    let backend = db.get_database_backend();
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();

    db.execute(Statement::from_sql_and_values(
        backend,
        "UPDATE expenses SET date = ? WHERE date IS NULL OR date = '';",
        vec![today.into()],
    ))
    .await?;

    Ok(())
}
