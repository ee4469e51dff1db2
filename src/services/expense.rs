//! Expense service
//!
//! Business operations on the ledger. Changes are written to the audit log
//! after they succeed; an audit failure is logged and never undoes or hides
//! a change that already reached the ledger.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::LedgerResult;
use crate::models::ExpenseRecord;
use crate::storage::{sum_amounts, totals_by_category, Storage};

/// Per-category totals plus the grand total
#[derive(Debug, Clone, Default)]
pub struct CategorySummary {
    /// Sum of amounts per category, sorted by category name
    pub totals: BTreeMap<String, Decimal>,
    /// Sum of all amounts
    pub total: Decimal,
    /// Number of records summarized
    pub count: usize,
}

impl CategorySummary {
    /// Summarize a list of records
    pub fn from_records(records: &[ExpenseRecord]) -> LedgerResult<Self> {
        Ok(Self {
            totals: totals_by_category(records)?,
            total: sum_amounts(records)?,
            count: records.len(),
        })
    }
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and append a new expense
    pub fn add(&self, date: &str, category: &str, amount: &str) -> LedgerResult<ExpenseRecord> {
        let record = self.storage.ledger.add_expense(date, category, amount)?;
        if let Err(e) = self.storage.log_add(&record) {
            warn!(record = %record, error = %e, "expense added but not audited");
        }
        Ok(record)
    }

    /// Delete the first stored record matching `record`
    ///
    /// Returns `false` if nothing matched.
    pub fn delete(&self, record: &ExpenseRecord) -> LedgerResult<bool> {
        let removed = self.storage.ledger.delete_record(record)?;
        if removed {
            if let Err(e) = self.storage.log_delete(record) {
                warn!(record = %record, error = %e, "expense deleted but not audited");
            }
        }
        Ok(removed)
    }

    /// Delete by raw (date, category, amount) input
    pub fn delete_matching(&self, date: &str, category: &str, amount: &str) -> LedgerResult<bool> {
        let target = ExpenseRecord::parse(date, category, amount)?;
        self.delete(&target)
    }

    /// All records in ledger order
    pub fn list(&self) -> LedgerResult<Vec<ExpenseRecord>> {
        self.storage.ledger.list_expenses()
    }

    /// Totals by category
    pub fn summary(&self) -> LedgerResult<CategorySummary> {
        CategorySummary::from_records(&self.list()?)
    }
}
