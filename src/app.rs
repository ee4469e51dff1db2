//! Application state
//!
//! The App struct holds what the front end shows: the displayed record list,
//! the current selection and sort, and a status line. Each handler delegates
//! to the ledger, updates the status message and leaves the displayed
//! records unchanged when the operation fails.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{ExpenseRecord, SortField};
use crate::services::{sort_view, ExpenseService};
use crate::storage::{sum_amounts, Storage};

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Error,
}

/// Message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == StatusLevel::Error
    }
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a Storage,

    /// Records in display order
    pub records: Vec<ExpenseRecord>,

    /// Index into `records` of the selected row
    pub selected: Option<usize>,

    /// Active sort column and direction (true = ascending)
    pub sort: Option<(SortField, bool)>,

    /// Last status message
    pub status: Option<StatusMessage>,
}

impl<'a> App<'a> {
    /// Create a new App with an empty view
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            records: Vec::new(),
            selected: None,
            sort: None,
            status: None,
        }
    }

    fn service(&self) -> ExpenseService<'a> {
        ExpenseService::new(self.storage)
    }

    /// Reload the view from the ledger and return its total
    ///
    /// The current sort is reapplied; a selection that no longer points at a
    /// row is cleared.
    pub fn refresh(&mut self) -> LedgerResult<Decimal> {
        let records = match self.service().list() {
            Ok(records) => records,
            Err(e) => {
                self.status = Some(StatusMessage::error("Error reading the expenses file!"));
                return Err(e);
            }
        };

        self.records = match self.sort {
            Some((field, ascending)) => sort_view(&records, field, ascending),
            None => records,
        };
        if self.selected.is_some_and(|i| i >= self.records.len()) {
            self.selected = None;
        }

        self.total()
    }

    /// Reload after a change that already reached the ledger
    ///
    /// A failed reload keeps the success status of the change.
    fn refresh_after_change(&mut self) {
        let status = self.status.clone();
        if let Err(e) = self.refresh() {
            warn!(error = %e, "view not refreshed after change");
            self.status = status;
        }
    }

    /// Add an expense from form input
    pub fn add(&mut self, date: &str, category: &str, amount: &str) -> LedgerResult<ExpenseRecord> {
        match self.service().add(date, category, amount) {
            Ok(record) => {
                self.status = Some(StatusMessage::success("Expense added successfully!"));
                self.refresh_after_change();
                Ok(record)
            }
            Err(e) => {
                self.status = Some(StatusMessage::error(add_error_message(&e)));
                Err(e)
            }
        }
    }

    /// Select a displayed row, or clear the selection with `None`
    pub fn select(&mut self, index: Option<usize>) -> LedgerResult<()> {
        match index {
            Some(i) if i >= self.records.len() => Err(LedgerError::NotFound(format!(
                "row {} (only {} expenses shown)",
                i + 1,
                self.records.len()
            ))),
            _ => {
                self.selected = index;
                Ok(())
            }
        }
    }

    /// Currently selected record
    pub fn selected_record(&self) -> Option<&ExpenseRecord> {
        self.selected.and_then(|i| self.records.get(i))
    }

    /// Delete the selected record from the ledger
    pub fn delete_selected(&mut self) -> LedgerResult<bool> {
        let Some(record) = self.selected_record().cloned() else {
            self.status = Some(StatusMessage::error("Please select an expense to delete!"));
            return Err(LedgerError::NotFound("no expense selected".into()));
        };

        match self.service().delete(&record) {
            Ok(removed) => {
                self.status = Some(StatusMessage::success("Expense deleted successfully!"));
                self.selected = None;
                self.refresh_after_change();
                Ok(removed)
            }
            Err(e) => {
                self.status = Some(StatusMessage::error("Error deleting the expense!"));
                Err(e)
            }
        }
    }

    /// Reorder the displayed records; the ledger file is not touched
    pub fn sort_by(&mut self, field: SortField, ascending: bool) {
        let selected = self.selected_record().cloned();

        self.records = sort_view(&self.records, field, ascending);
        self.sort = Some((field, ascending));

        // Keep the selection on the same record
        self.selected = selected.and_then(|s| self.records.iter().position(|r| r.same_entry(&s)));
    }

    /// Sum of the displayed records
    pub fn total(&self) -> LedgerResult<Decimal> {
        sum_amounts(&self.records)
    }

    /// Mapping handed to the chart renderer
    pub fn category_totals(&mut self) -> LedgerResult<BTreeMap<String, Decimal>> {
        match self.storage.ledger.aggregate_by_category() {
            Ok(totals) => Ok(totals),
            Err(e) => {
                self.status = Some(StatusMessage::error("Error plotting expenses!"));
                Err(e)
            }
        }
    }

    /// Export the ledger to CSV
    pub fn export(&mut self, destination: &Path) -> LedgerResult<usize> {
        match self.storage.ledger.export_csv(destination) {
            Ok(rows) => {
                self.status = Some(StatusMessage::success(format!(
                    "Expenses exported to {}!",
                    destination.display()
                )));
                Ok(rows)
            }
            Err(e) => {
                self.status = Some(StatusMessage::error("Error exporting to CSV!"));
                Err(e)
            }
        }
    }
}

/// Status text for a failed add, matching the form's messages
fn add_error_message(err: &LedgerError) -> String {
    match err {
        LedgerError::InvalidDate(_) => "Invalid date format! Use YYYY-MM-DD.".to_string(),
        LedgerError::InvalidAmount(_) => "Amount must be a number!".to_string(),
        LedgerError::MissingField(_) => "Please fill all the fields!".to_string(),
        LedgerError::InvalidCategory(_) => "Category must not contain commas!".to_string(),
        other => format!("Error adding the expense: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LedgerPaths, Settings};
    use std::fs;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, &Settings::default()).unwrap();
        (temp_dir, storage)
    }

    fn amounts(app: &App<'_>) -> Vec<String> {
        app.records.iter().map(|r| r.amount.to_string()).collect()
    }

    #[test]
    fn test_add_refreshes_view() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = App::new(&storage);

        app.add("2024-01-01", "Food", "10.00").unwrap();

        assert_eq!(app.records.len(), 1);
        assert_eq!(
            app.status,
            Some(StatusMessage::success("Expense added successfully!"))
        );
    }

    #[test]
    fn test_add_error_sets_status_and_keeps_view() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = App::new(&storage);
        app.add("2024-01-01", "Food", "10.00").unwrap();

        assert!(app.add("2024-13-40", "Food", "1").is_err());
        assert_eq!(
            app.status.as_ref().unwrap().text,
            "Invalid date format! Use YYYY-MM-DD."
        );

        assert!(app.add("2024-01-01", "Food", "abc").is_err());
        assert_eq!(app.status.as_ref().unwrap().text, "Amount must be a number!");

        assert!(app.add("2024-01-01", "", "1").is_err());
        assert_eq!(app.status.as_ref().unwrap().text, "Please fill all the fields!");
        assert!(app.status.as_ref().unwrap().is_error());

        assert_eq!(app.records.len(), 1);
    }

    #[test]
    fn test_add_succeeds_when_audit_log_unwritable() {
        let (_temp_dir, storage) = create_test_storage();
        fs::create_dir_all(storage.audit.path()).unwrap();
        let mut app = App::new(&storage);

        app.add("2024-01-01", "Food", "1").unwrap();

        assert_eq!(app.records.len(), 1);
        assert!(!app.status.as_ref().unwrap().is_error());
        assert_eq!(storage.ledger.list_expenses().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_without_selection_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = App::new(&storage);
        app.add("2024-01-01", "Food", "10.00").unwrap();

        let err = app.delete_selected().unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            app.status.as_ref().unwrap().text,
            "Please select an expense to delete!"
        );
        assert_eq!(storage.ledger.list_expenses().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_selected_after_sort() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = App::new(&storage);
        app.add("2024-01-01", "A", "30").unwrap();
        app.add("2024-01-02", "B", "10").unwrap();
        app.add("2024-01-03", "C", "20").unwrap();

        app.sort_by(SortField::Amount, true);
        assert_eq!(amounts(&app), vec!["10", "20", "30"]);

        // First displayed row is the 10, which is second on disk
        app.select(Some(0)).unwrap();
        assert!(app.delete_selected().unwrap());

        assert_eq!(amounts(&app), vec!["20", "30"]);
        assert_eq!(
            fs::read_to_string(storage.ledger.path()).unwrap(),
            "2024-01-01,A,30\n2024-01-03,C,20\n"
        );
    }

    #[test]
    fn test_sort_does_not_touch_ledger() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = App::new(&storage);
        app.add("2024-01-01", "A", "30").unwrap();
        app.add("2024-01-02", "B", "10").unwrap();
        app.add("2024-01-03", "C", "20").unwrap();

        app.sort_by(SortField::Amount, true);
        assert_eq!(amounts(&app), vec!["10", "20", "30"]);

        let on_disk: Vec<String> = storage
            .ledger
            .list_expenses()
            .unwrap()
            .iter()
            .map(|r| r.amount.to_string())
            .collect();
        assert_eq!(on_disk, vec!["30", "10", "20"]);
    }

    #[test]
    fn test_sort_keeps_selection_on_record() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = App::new(&storage);
        app.add("2024-01-01", "A", "30").unwrap();
        app.add("2024-01-02", "B", "10").unwrap();

        app.select(Some(0)).unwrap();
        app.sort_by(SortField::Amount, true);

        assert_eq!(app.selected, Some(1));
        assert_eq!(app.selected_record().unwrap().category, "A");
    }

    #[test]
    fn test_select_out_of_range() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = App::new(&storage);
        app.refresh().unwrap();

        assert!(app.select(Some(0)).unwrap_err().is_not_found());
        assert!(app.select(None).is_ok());
    }

    #[test]
    fn test_totals_and_export() {
        let (temp_dir, storage) = create_test_storage();
        let mut app = App::new(&storage);
        app.add("2024-01-01", "Food", "10.00").unwrap();
        app.add("2024-01-02", "Food", "5.50").unwrap();
        app.add("2024-01-03", "Travel", "20.00").unwrap();

        assert_eq!(app.total().unwrap(), Decimal::from_str("35.50").unwrap());
        let totals = app.category_totals().unwrap();
        assert_eq!(totals["Food"], Decimal::from_str("15.50").unwrap());

        let out = temp_dir.path().join("expenses.csv");
        assert_eq!(app.export(&out).unwrap(), 3);
        assert!(app.status.as_ref().unwrap().text.starts_with("Expenses exported to"));
    }

    #[test]
    fn test_export_failure_status() {
        let (temp_dir, storage) = create_test_storage();
        let mut app = App::new(&storage);

        let out = temp_dir.path().join("missing").join("expenses.csv");
        assert!(app.export(&out).is_err());
        assert_eq!(app.status.as_ref().unwrap().text, "Error exporting to CSV!");
    }
}
