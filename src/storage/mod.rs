//! Storage layer
//!
//! Plain-text ledger with atomic rewrites, plus the audit log that records
//! every change made through the application.

pub mod file_io;
pub mod ledger;

pub use file_io::{append_line, read_lines, write_lines_atomic};
pub use ledger::{sum_amounts, totals_by_category, LedgerScan, LedgerStore};

use std::path::PathBuf;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::LedgerPaths;
use crate::config::settings::Settings;
use crate::error::LedgerError;
use crate::models::ExpenseRecord;

/// Storage coordinator: the ledger plus its audit log
pub struct Storage {
    paths: LedgerPaths,
    pub ledger: LedgerStore,
    pub audit: AuditLogger,
}

impl Storage {
    /// Open storage using the configured ledger location
    pub fn open(paths: LedgerPaths, settings: &Settings) -> Result<Self, LedgerError> {
        let ledger_path = settings.ledger_path(&paths);
        Self::with_ledger_file(paths, ledger_path, settings)
    }

    /// Open storage with an explicit ledger file
    pub fn with_ledger_file(
        paths: LedgerPaths,
        ledger_path: PathBuf,
        settings: &Settings,
    ) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            ledger: LedgerStore::open(ledger_path, settings.malformed_lines)?,
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Record an added expense in the audit log
    pub fn log_add(&self, record: &ExpenseRecord) -> Result<(), LedgerError> {
        self.audit.log(&AuditEntry::add(record))
    }

    /// Record a deleted expense in the audit log
    pub fn log_delete(&self, record: &ExpenseRecord) -> Result<(), LedgerError> {
        self.audit.log(&AuditEntry::delete(record))
    }
}
