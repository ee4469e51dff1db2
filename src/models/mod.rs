//! Core data models

pub mod expense;

pub use expense::{parse_amount, parse_date, ExpenseRecord, SortField, DATE_FORMAT, DELIMITER};
