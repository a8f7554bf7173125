//! Time-window selection over expense records.
//!
//! Weeks run Sunday through Saturday; the boundary is Sunday 00:00 in the
//! zone the engine was configured with. Record dates are free text until
//! proven otherwise: only the canonical `YYYY-MM-DD` shape parses, and a
//! record whose date does not parse is excluded from every window except
//! [`TimeFilter::All`].

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Which slice of the ledger the derived views expose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFilter {
    #[default]
    All,
    ThisWeek,
    ThisMonth,
}

impl TimeFilter {
    /// Whether a record dated `date_text` falls inside the window containing
    /// `today`.
    pub fn matches(self, date_text: &str, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::ThisWeek => parse_canonical_date(date_text)
                .is_some_and(|date| week_start(date) == week_start(today)),
            Self::ThisMonth => parse_canonical_date(date_text)
                .is_some_and(|date| (date.year(), date.month()) == (today.year(), today.month())),
        }
    }
}

/// The Sunday that begins the calendar week containing `date`.
pub(crate) fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

/// Strict `YYYY-MM-DD` parsing: exactly three hyphen-separated numeric
/// components naming a real calendar date. Anything else - extra components,
/// non-numeric text, a day that would roll over into the next month - is
/// unparseable.
pub(crate) fn parse_canonical_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split('-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let day = parts.next()?.parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}
