//! CLI commands for expense management

use std::io::IsTerminal;

use clap::{Args, ValueEnum};

use crate::app::App;
use crate::display::{
    format_category_chart, format_category_summary, format_expense_table, format_total_line,
};
use crate::error::{LedgerError, LedgerResult};
use crate::models::SortField;
use crate::services::ExpenseService;
use crate::tui;

/// Width of the text chart bars
const TEXT_CHART_WIDTH: usize = 40;

/// Column to sort a listing by
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortColumn {
    Date,
    Category,
    Amount,
}

impl From<SortColumn> for SortField {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Date => SortField::Date,
            SortColumn::Category => SortField::Category,
            SortColumn::Amount => SortField::Amount,
        }
    }
}

/// Sort options shared by `list` and `delete --row`
#[derive(Args, Debug, Clone, Default)]
pub struct SortArgs {
    /// Column to sort by
    #[arg(short, long, value_enum)]
    pub sort: Option<SortColumn>,

    /// Sort in descending order
    #[arg(long)]
    pub desc: bool,
}

impl SortArgs {
    /// Sort column and direction (true = ascending), if any
    ///
    /// `--desc` on its own sorts by date.
    pub fn order(&self) -> Option<(SortField, bool)> {
        match (self.sort, self.desc) {
            (Some(column), desc) => Some((column.into(), !desc)),
            (None, true) => Some((SortField::Date, false)),
            (None, false) => None,
        }
    }
}

/// Arguments of `expense delete`
#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// Expense date (YYYY-MM-DD)
    #[arg(conflicts_with = "row")]
    pub date: Option<String>,

    /// Expense category
    pub category: Option<String>,

    /// Expense amount, as stored
    #[arg(allow_hyphen_values = true)]
    pub amount: Option<String>,

    /// 1-based row number from `expense list`
    #[arg(short, long)]
    pub row: Option<usize>,

    #[command(flatten)]
    pub sort: SortArgs,
}

/// Append an expense
pub fn handle_add(app: &mut App<'_>, date: &str, category: &str, amount: &str) -> LedgerResult<()> {
    let record = app.add(date, category, amount)?;

    if let Some(status) = &app.status {
        println!("{}", status.text);
    }
    println!("  {}", record);

    Ok(())
}

/// Print the expense table and its total
pub fn handle_list(app: &mut App<'_>, sort: &SortArgs, symbol: &str) -> LedgerResult<()> {
    app.sort = sort.order();
    let total = app.refresh()?;

    print!("{}", format_expense_table(&app.records));
    println!("{}", format_total_line(total, app.records.len(), symbol));

    Ok(())
}

/// Delete an expense by value or by listing row
pub fn handle_delete(app: &mut App<'_>, args: &DeleteArgs) -> LedgerResult<()> {
    if let Some(row) = args.row {
        app.sort = args.sort.order();
        app.refresh()?;

        let index = row
            .checked_sub(1)
            .ok_or_else(|| LedgerError::NotFound("rows are numbered from 1".into()))?;
        app.select(Some(index))?;
        let record = app.selected_record().cloned();
        app.delete_selected()?;

        if let Some(status) = &app.status {
            println!("{}", status.text);
        }
        if let Some(record) = record {
            println!("  {}", record);
        }
        return Ok(());
    }

    if args.date.is_none() && args.category.is_none() && args.amount.is_none() {
        return Err(LedgerError::NotFound(
            "no expense given (pass DATE CATEGORY AMOUNT or --row N)".into(),
        ));
    }

    let date = args.date.as_deref().unwrap_or_default();
    let category = args.category.as_deref().unwrap_or_default();
    let amount = args.amount.as_deref().unwrap_or_default();

    let service = ExpenseService::new(app.storage);
    if !service.delete_matching(date, category, amount)? {
        return Err(LedgerError::NotFound(format!(
            "no expense matches {},{},{}",
            date.trim(),
            category.trim(),
            amount.trim()
        )));
    }

    println!("Expense deleted successfully!");
    Ok(())
}

/// Print totals per category
pub fn handle_summary(app: &App<'_>, symbol: &str) -> LedgerResult<()> {
    let summary = ExpenseService::new(app.storage).summary()?;

    print!(
        "{}",
        format_category_summary(&summary.totals, summary.total, symbol)
    );
    if summary.count > 0 {
        println!("{} expenses", summary.count);
    }

    Ok(())
}

/// Show the category chart
///
/// Falls back to text bars when stdout is not a terminal.
pub fn handle_plot(app: &mut App<'_>, text: bool, symbol: &str) -> anyhow::Result<()> {
    let totals = app.category_totals()?;

    if text || !std::io::stdout().is_terminal() {
        print!("{}", format_category_chart(&totals, TEXT_CHART_WIDTH, symbol));
        return Ok(());
    }

    tui::run_chart(&totals, symbol)
}
