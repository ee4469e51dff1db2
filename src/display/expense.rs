//! Expense table formatting
//!
//! Renders a record list as the Date / Category / Amount table shown by
//! `expense list`.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::ExpenseRecord;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "#")]
    row: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format records as a table with 1-based row numbers
///
/// Amounts are shown as stored.
pub fn format_expense_table(records: &[ExpenseRecord]) -> String {
    if records.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = records.iter().enumerate().map(|(i, r)| ExpenseRow {
        row: i + 1,
        date: r.date_string(),
        category: r.category.clone(),
        amount: r.amount.to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}
