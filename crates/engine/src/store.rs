//! Row-level persistence for the `expenses` relation.

use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{ExpenseRecord, StorageError, expenses};

type ResultStore<T> = Result<T, StorageError>;

/// Owns the durable relation. Validation happens in the engine above;
/// every operation here persists exactly what it is given.
#[derive(Clone, Debug)]
pub struct Store {
    database: DatabaseConnection,
}

impl Store {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }

    /// Bring the schema up to date. Safe to call on every start: applied
    /// migrations are skipped, and the date repair guards itself against
    /// tables created before the migration history existed.
    pub async fn initialize(&self) -> ResultStore<()> {
        Migrator::up(&self.database, None)
            .await
            .map_err(StorageError::Initialize)
    }

    /// Every record, most recently created first.
    pub async fn list_all(&self) -> ResultStore<Vec<ExpenseRecord>> {
        let models = expenses::Entity::find()
            .order_by_desc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(ExpenseRecord::from).collect())
    }

    /// Persist a new row and return the generated id.
    pub async fn insert(
        &self,
        amount: f64,
        category: &str,
        note: Option<&str>,
        date: &str,
    ) -> ResultStore<i64> {
        let model = expenses::ActiveModel {
            id: ActiveValue::NotSet,
            amount: ActiveValue::Set(amount),
            category: ActiveValue::Set(category.to_string()),
            note: ActiveValue::Set(note.map(str::to_string)),
            date: ActiveValue::Set(Some(date.to_string())),
        }
        .insert(&self.database)
        .await?;
        Ok(model.id)
    }

    /// Overwrite all mutable fields of the row matching `id`. A missing row
    /// is not an error: callers hand in ids from a prior read, and the row
    /// may have been deleted since.
    pub async fn update(
        &self,
        id: i64,
        amount: f64,
        category: &str,
        note: Option<&str>,
        date: &str,
    ) -> ResultStore<()> {
        expenses::Entity::update_many()
            .set(expenses::ActiveModel {
                id: ActiveValue::NotSet,
                amount: ActiveValue::Set(amount),
                category: ActiveValue::Set(category.to_string()),
                note: ActiveValue::Set(note.map(str::to_string)),
                date: ActiveValue::Set(Some(date.to_string())),
            })
            .filter(expenses::Column::Id.eq(id))
            .exec(&self.database)
            .await?;
        Ok(())
    }

    /// Remove the row matching `id`. Missing rows are a no-op.
    pub async fn delete(&self, id: i64) -> ResultStore<()> {
        expenses::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        Ok(())
    }
}
