//! Display ordering of already-loaded records
//!
//! Sorting only reorders an in-memory list; the ledger file keeps its
//! insertion order.

use std::cmp::Ordering;

use crate::models::{ExpenseRecord, SortField};

/// Compare two records by a single field
pub fn compare_by(field: SortField, a: &ExpenseRecord, b: &ExpenseRecord) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Category => a.category.cmp(&b.category),
        SortField::Amount => a.amount.cmp(&b.amount),
    }
}

/// Stable sort of a record list by one field
///
/// Records with equal keys keep their relative order in both directions.
pub fn sort_view(
    records: &[ExpenseRecord],
    field: SortField,
    ascending: bool,
) -> Vec<ExpenseRecord> {
    let mut sorted = records.to_vec();
    if ascending {
        sorted.sort_by(|a, b| compare_by(field, a, b));
    } else {
        sorted.sort_by(|a, b| compare_by(field, b, a));
    }
    sorted
}
