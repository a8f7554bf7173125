//! Aggregation over a filtered view.

use serde::Serialize;

use crate::ExpenseRecord;

/// Bucket label for records whose category is blank.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One entry of the per-category breakdown, in the `{label, value}` shape
/// the chart collaborator consumes as-is.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub label: String,
    pub value: f64,
}

/// Sums derived from a filtered view: the overall total and the per-category
/// breakdown, categories ordered by first appearance in the view.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Totals {
    pub total: f64,
    pub by_category: Vec<CategoryTotal>,
}

impl Totals {
    pub(crate) fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        let mut totals = Totals::default();
        for record in records {
            totals.total += record.amount;
            let label = match record.category.trim() {
                "" => UNCATEGORIZED,
                trimmed => trimmed,
            };
            match totals
                .by_category
                .iter_mut()
                .find(|entry| entry.label == label)
            {
                Some(entry) => entry.value += record.amount,
                None => totals.by_category.push(CategoryTotal {
                    label: label.to_string(),
                    value: record.amount,
                }),
            }
        }
        totals
    }
}
