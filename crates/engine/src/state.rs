//! Screen-level mutable state, gathered in one container.
//!
//! The draft, the edit session, and the active filter travel together as
//! [`EngineState`]; the engine owns the only instance and the UI reads it
//! through accessors.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{ExpenseRecord, TimeFilter};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The text fields the user is composing, for a new or an edited record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Draft {
    pub amount: String,
    pub category: String,
    pub note: String,
    pub date: String,
}

impl Draft {
    /// A cleared draft: empty fields, date preset to `today`.
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            date: today.format(DATE_FORMAT).to_string(),
            ..Self::default()
        }
    }

    /// Pre-populate the fields from an existing record, rendering the amount
    /// back to text.
    pub(crate) fn from_record(record: &ExpenseRecord, today: NaiveDate) -> Self {
        Self {
            amount: record.amount.to_string(),
            category: record.category.clone(),
            note: record.note.clone().unwrap_or_default(),
            date: if record.date.is_empty() {
                today.format(DATE_FORMAT).to_string()
            } else {
                record.date.clone()
            },
        }
    }

    /// Validate and normalize the draft. `None` leaves the fields exactly as
    /// typed and nothing reaches the store.
    pub(crate) fn parse(&self, today: NaiveDate) -> Option<ParsedDraft> {
        let amount = self.amount.trim().parse::<f64>().ok()?;
        if !amount.is_finite() || amount <= 0.0 {
            return None;
        }

        let category = self.category.trim();
        if category.is_empty() {
            return None;
        }

        let note = match self.note.trim() {
            "" => None,
            trimmed => Some(trimmed.to_string()),
        };

        // A non-empty date is kept verbatim, well-formed or not; malformed
        // dates only ever fall out of the windowed views.
        let date = match self.date.trim() {
            "" => today.format(DATE_FORMAT).to_string(),
            trimmed => trimmed.to_string(),
        };

        Some(ParsedDraft {
            amount,
            category: category.to_string(),
            note,
            date,
        })
    }
}

/// A draft that passed validation, ready for the store.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ParsedDraft {
    pub amount: f64,
    pub category: String,
    pub note: Option<String>,
    pub date: String,
}

/// Whether the draft targets a new record or an existing one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Session {
    #[default]
    Idle,
    Editing(i64),
}

/// All mutable screen state in one place: no ambient globals.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EngineState {
    pub draft: Draft,
    pub session: Session,
    pub filter: TimeFilter,
}

impl EngineState {
    pub(crate) fn new(today: NaiveDate) -> Self {
        Self {
            draft: Draft::empty(today),
            session: Session::Idle,
            filter: TimeFilter::default(),
        }
    }

    /// Back to `Idle` with a cleared draft. The filter is screen state of
    /// its own and survives.
    pub(crate) fn reset_draft(&mut self, today: NaiveDate) {
        self.draft = Draft::empty(today);
        self.session = Session::Idle;
    }
}
