//! Display formatting for terminal output

pub mod expense;
pub mod report;

pub use expense::format_expense_table;
pub use report::{
    format_bar, format_category_chart, format_category_summary, format_money, format_total_line,
};
