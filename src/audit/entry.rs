//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ExpenseRecord;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Expense was appended to the ledger
    Add,
    /// Expense was removed from the ledger
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Add => write!(f, "ADD"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// The record that was added or deleted
    pub record: ExpenseRecord,
}

impl AuditEntry {
    /// Entry for an appended expense
    pub fn add(record: &ExpenseRecord) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Add,
            record: record.clone(),
        }
    }

    /// Entry for a deleted expense
    pub fn delete(record: &ExpenseRecord) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            record: record.clone(),
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        format!(
            "[{}] {:6} {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.record.date_string(),
            self.record.category,
            self.record.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ExpenseRecord {
        ExpenseRecord::parse("2024-05-01", "Food", "12.30").unwrap()
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Add.to_string(), "ADD");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::delete(&record());

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"operation\":\"delete\""));

        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.operation, Operation::Delete);
        assert_eq!(deserialized.record, record());
    }

    #[test]
    fn test_human_readable_format() {
        let formatted = AuditEntry::add(&record()).format_human_readable();
        assert!(formatted.contains("ADD"));
        assert!(formatted.contains("2024-05-01 Food 12.30"));
    }
}
