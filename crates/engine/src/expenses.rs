//! The `expenses` relation and its in-memory record type.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A single persisted spending event.
///
/// `id` is assigned by the store on insert, unique, and never changes.
/// `date` holds the canonical `YYYY-MM-DD` text form; after the schema
/// repair every stored row carries one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: i64,
    pub amount: f64,
    pub category: String,
    pub note: Option<String>,
    pub date: String,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub category: String,
    pub note: Option<String>,
    pub date: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ExpenseRecord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            amount: model.amount,
            category: model.category,
            note: model.note,
            // Null only on rows the date repair has not seen yet.
            date: model.date.unwrap_or_default(),
        }
    }
}
