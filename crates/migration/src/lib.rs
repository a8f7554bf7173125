pub use sea_orm_migration::prelude::*;

mod m20251102_000001_expenses;
mod m20260119_000002_expense_dates;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251102_000001_expenses::Migration),
            Box::new(m20260119_000002_expense_dates::Migration),
        ]
    }
}
