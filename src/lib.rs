//! Expense Ledger - a small personal expense tracker
//!
//! Expenses are (date, category, amount) records kept one per line in a
//! plain-text ledger file. The library validates input, appends and deletes
//! records, lists them in stored or sorted order, and computes totals per
//! category for the summary table and the bar chart.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: The expense record and its validation
//! - `storage`: The ledger file store
//! - `services`: Business logic and sorted views
//! - `app`: Front-end state (view, selection, status line)
//! - `audit`: Audit log of adds and deletes
//! - `export`: CSV, JSON and YAML export
//! - `display`: Terminal formatting
//! - `tui`: Full-screen bar chart
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_ledger::config::{LedgerPaths, Settings};
//! use expense_ledger::storage::Storage;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths, &settings)?;
//! storage.ledger.add_expense("2024-03-15", "Food", "12.50")?;
//! ```

pub mod app;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{LedgerError, LedgerResult};
