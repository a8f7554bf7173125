//! A single-writer personal expense ledger.
//!
//! Two layers, loaded bottom-up. [`Store`] owns the durable `expenses`
//! relation: schema initialization (with in-place repair of installs that
//! predate the `date` column) and row-level CRUD. [`Engine`] sits above it
//! with the in-memory working set, the add/edit session, and the
//! time-window views the UI and chart collaborators read.
//!
//! Every mutation writes to the store and then reloads the working set
//! wholesale, so readers never observe records that disagree with a fresh
//! read. Mutating methods take `&mut self`: a second mutation cannot start
//! before the previous reload completed.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use sea_orm::DatabaseConnection;

pub use error::StorageError;
pub use expenses::ExpenseRecord;
pub use filter::TimeFilter;
pub use state::{Draft, EngineState, Session};
pub use store::Store;
pub use totals::{CategoryTotal, Totals, UNCATEGORIZED};

mod error;
mod expenses;
mod filter;
mod state;
mod store;
mod totals;

type ResultEngine<T> = Result<T, StorageError>;

/// Outcome of submitting the draft. `Rejected` means validation failed:
/// the draft is left as typed for correction and the store was not touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    Rejected,
}

#[derive(Debug)]
pub struct Engine {
    store: Store,
    records: Vec<ExpenseRecord>,
    state: EngineState,
    zone: Tz,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Today's calendar date in the configured zone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.zone).date_naive()
    }

    /// Replace the working set with a fresh read of the store.
    pub async fn refresh(&mut self) -> ResultEngine<()> {
        self.records = self.store.list_all().await?;
        Ok(())
    }

    /// Commit the draft: insert while `Idle`, overwrite the targeted record
    /// while `Editing`. Both paths validate identically; on success the
    /// session returns to `Idle`, the draft is cleared, and the working set
    /// is reloaded.
    ///
    /// A non-empty draft date is stored verbatim, well-formed or not -
    /// malformed dates only ever fall out of the windowed views.
    pub async fn submit_draft(&mut self) -> ResultEngine<SubmitOutcome> {
        let today = self.today();
        let Some(parsed) = self.state.draft.parse(today) else {
            tracing::debug!("draft rejected, fields left as typed");
            return Ok(SubmitOutcome::Rejected);
        };

        match self.state.session {
            Session::Idle => {
                self.store
                    .insert(
                        parsed.amount,
                        &parsed.category,
                        parsed.note.as_deref(),
                        &parsed.date,
                    )
                    .await?;
            }
            Session::Editing(id) => {
                self.store
                    .update(
                        id,
                        parsed.amount,
                        &parsed.category,
                        parsed.note.as_deref(),
                        &parsed.date,
                    )
                    .await?;
            }
        }

        self.state.reset_draft(today);
        self.refresh().await?;
        Ok(SubmitOutcome::Saved)
    }

    /// Start editing `id`, pre-populating the draft from the record.
    /// Unknown ids are ignored: the UI may still hold a row deleted moments
    /// ago.
    pub fn begin_edit(&mut self, id: i64) {
        let today = self.today();
        match self.records.iter().find(|record| record.id == id) {
            Some(record) => {
                self.state.draft = Draft::from_record(record, today);
                self.state.session = Session::Editing(id);
            }
            None => tracing::debug!(id, "ignoring edit request for unknown record"),
        }
    }

    /// Drop the draft and return to `Idle`. Never touches the store.
    pub fn cancel_edit(&mut self) {
        self.state.reset_draft(self.today());
    }

    /// Delete `id` and reload the working set. Absent ids are a no-op.
    /// Deleting the record currently under edit also resets the session, so
    /// an `Editing` session always targets a record the working set holds.
    pub async fn delete_record(&mut self, id: i64) -> ResultEngine<()> {
        self.store.delete(id).await?;
        if self.state.session == Session::Editing(id) {
            self.state.reset_draft(self.today());
        }
        self.refresh().await
    }

    /// Select which time window the derived views expose. Pure state change.
    pub fn set_filter(&mut self, filter: TimeFilter) {
        self.state.filter = filter;
    }

    /// The full working set, most recently created first.
    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    /// Read-only screen state: draft, session, filter.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Mutable access to the draft fields the user is typing into.
    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.state.draft
    }

    /// Records passing the active filter, in working-set order.
    pub fn filtered_view(&self) -> Vec<&ExpenseRecord> {
        self.filtered_view_on(self.today())
    }

    /// Like [`Engine::filtered_view`], with the evaluation date supplied by
    /// the caller instead of read from the clock.
    pub fn filtered_view_on(&self, today: NaiveDate) -> Vec<&ExpenseRecord> {
        self.records
            .iter()
            .filter(|record| self.state.filter.matches(&record.date, today))
            .collect()
    }

    /// Sums over the current filtered view, recomputed on every call. The
    /// `by_category` sequence is the chart collaborator's feed.
    pub fn totals(&self) -> Totals {
        self.totals_on(self.today())
    }

    /// Like [`Engine::totals`], with the evaluation date supplied by the
    /// caller.
    pub fn totals_on(&self, today: NaiveDate) -> Totals {
        Totals::compute(self.filtered_view_on(today))
    }
}

/// The builder for `Engine`
pub struct EngineBuilder {
    database: DatabaseConnection,
    zone: Tz,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            database: DatabaseConnection::default(),
            zone: chrono_tz::UTC,
        }
    }
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Zone used for "today": the draft date default and the week/month
    /// window boundaries.
    pub fn zone(mut self, zone: Tz) -> EngineBuilder {
        self.zone = zone;
        self
    }

    /// Construct `Engine`: bring the schema up to date, then load the
    /// working set.
    pub async fn build(self) -> ResultEngine<Engine> {
        let store = Store::new(self.database);
        store.initialize().await?;

        let today = Utc::now().with_timezone(&self.zone).date_naive();
        let mut engine = Engine {
            store,
            records: Vec::new(),
            state: EngineState::new(today),
            zone: self.zone,
        };
        engine.refresh().await?;
        Ok(engine)
    }
}
