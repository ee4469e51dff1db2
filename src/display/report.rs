//! Report formatting utilities for terminal output
//!
//! Money formatting, the category summary table and the text bar chart.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Format an amount with two decimals and an optional currency symbol
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{:.2}", symbol, rounded.abs())
    } else {
        format!("{}{:.2}", symbol, rounded.abs())
    }
}

/// Line shown under the expense table
pub fn format_total_line(total: Decimal, count: usize, symbol: &str) -> String {
    if count == 0 {
        "No expenses recorded.".to_string()
    } else {
        format!("Total Expense: {}", format_money(total, symbol))
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: Decimal, max_value: Decimal, width: usize) -> String {
    if max_value <= Decimal::ZERO || value <= Decimal::ZERO {
        return " ".repeat(width);
    }

    let filled = (value / max_value * Decimal::from(width))
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Category totals as an aligned two-column listing with a grand total
pub fn format_category_summary(
    totals: &BTreeMap<String, Decimal>,
    total: Decimal,
    symbol: &str,
) -> String {
    if totals.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let name_width = totals
        .keys()
        .map(|k| k.chars().count())
        .max()
        .unwrap_or(0)
        .max("Category".len());
    let amounts: Vec<String> = totals.values().map(|v| format_money(*v, symbol)).collect();
    let total_text = format_money(total, symbol);
    let amount_width = amounts
        .iter()
        .chain(std::iter::once(&total_text))
        .map(|a| a.chars().count())
        .max()
        .unwrap_or(0)
        .max("Amount".len());

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>amount_width$}\n",
        "Category", "Amount"
    ));
    output.push_str(&separator(name_width + amount_width + 2));
    output.push('\n');

    for (name, amount) in totals.keys().zip(&amounts) {
        output.push_str(&format!("{:<name_width$}  {:>amount_width$}\n", name, amount));
    }

    output.push_str(&separator(name_width + amount_width + 2));
    output.push('\n');
    output.push_str(&format!(
        "{:<name_width$}  {:>amount_width$}\n",
        "Total", total_text
    ));

    output
}

/// Horizontal bar chart of totals per category
///
/// Bars are scaled to the largest total. Categories with a zero or negative
/// total get an empty bar but still show their value.
pub fn format_category_chart(
    totals: &BTreeMap<String, Decimal>,
    width: usize,
    symbol: &str,
) -> String {
    let mut output = String::from("Expenses by Category\n");

    if totals.is_empty() {
        output.push_str("No expenses recorded.\n");
        return output;
    }

    let max_value = totals.values().copied().max().unwrap_or(Decimal::ZERO);
    let name_width = totals.keys().map(|k| k.chars().count()).max().unwrap_or(0);

    for (name, value) in totals {
        output.push_str(&format!(
            "{:<name_width$} │{} {}\n",
            name,
            format_bar(*value, max_value, width),
            format_money(*value, symbol)
        ));
    }

    output
}
