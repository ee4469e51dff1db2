//! Expense record model
//!
//! An expense is a (date, category, amount) triple with no identity of its
//! own. Records are stored one per line as `date,category,amount`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// Field delimiter of the ledger file
pub const DELIMITER: char = ',';

/// Date format used for parsing and storage
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single expense entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Calendar date of the expense
    pub date: NaiveDate,
    /// Free-text category label
    pub category: String,
    /// Monetary amount, sign unrestricted
    pub amount: Decimal,
}

impl ExpenseRecord {
    /// Validate raw user input and build a record
    ///
    /// Checks run in order: date, amount, then presence of the category,
    /// then that the category can be stored without escaping. The category is
    /// kept exactly as entered.
    pub fn parse(date: &str, category: &str, amount: &str) -> LedgerResult<Self> {
        let date = parse_date(date)?;
        let amount = parse_amount(amount)?;

        if category.trim().is_empty() {
            return Err(LedgerError::MissingField("category"));
        }
        if category.contains(|c: char| c == DELIMITER || c == '\n' || c == '\r') {
            return Err(LedgerError::InvalidCategory(category.to_string()));
        }

        Ok(Self {
            date,
            category: category.to_string(),
            amount,
        })
    }

    /// Parse one line of the ledger file
    ///
    /// On failure the returned string describes what was wrong with the line.
    pub fn from_line(line: &str) -> Result<Self, String> {
        let fields: Vec<&str> = line.trim().split(DELIMITER).collect();
        if fields.len() != 3 {
            return Err(format!("expected 3 fields, found {}", fields.len()));
        }

        Self::parse(fields[0], fields[1], fields[2]).map_err(|e| e.to_string())
    }

    /// Serialize to a ledger line (without the trailing newline)
    pub fn to_line(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.date.format(DATE_FORMAT),
            DELIMITER,
            self.category,
            DELIMITER,
            self.amount
        )
    }

    /// Structural equality on the serialized form
    ///
    /// `10.5` and `10.50` are different entries even though the amounts
    /// compare equal numerically.
    pub fn same_entry(&self, other: &ExpenseRecord) -> bool {
        self.to_line() == other.to_line()
    }

    /// Date as ISO text
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_line())
    }
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(s: &str) -> LedgerResult<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| LedgerError::InvalidDate(s.to_string()))
}

/// Parse a finite decimal amount
///
/// Accepts plain decimal text ("12.50", "-3") and scientific notation ("1e3").
/// The scale of the input is preserved so the stored text round-trips.
pub fn parse_amount(s: &str) -> LedgerResult<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return Err(LedgerError::InvalidAmount(String::new()));
    }

    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| LedgerError::InvalidAmount(s.to_string()))
}

/// Column a record list can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Date,
    Category,
    Amount,
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Date => write!(f, "Date"),
            SortField::Category => write!(f, "Category"),
            SortField::Amount => write!(f, "Amount"),
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(SortField::Date),
            "category" => Ok(SortField::Category),
            "amount" => Ok(SortField::Amount),
            other => Err(format!("unknown sort field: {}", other)),
        }
    }
}
