//! JSON Export functionality
//!
//! Exports the whole ledger to JSON with a schema version and a total.

use std::io::Write;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerResult;
use crate::models::ExpenseRecord;
use crate::storage::ledger::sum_amounts;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: u32 = 1;

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    /// Schema version for compatibility checking
    pub schema_version: u32,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Sum of all amounts
    pub total: Decimal,

    /// Records in ledger order
    pub expenses: Vec<ExpenseRecord>,
}

impl LedgerExport {
    /// Build an export from a list of records
    pub fn new(expenses: Vec<ExpenseRecord>) -> LedgerResult<Self> {
        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            total: sum_amounts(&expenses)?,
            expenses,
        })
    }
}

/// Export records to JSON
pub fn export_json<W: Write>(
    writer: &mut W,
    records: &[ExpenseRecord],
    pretty: bool,
) -> LedgerResult<()> {
    let export = LedgerExport::new(records.to_vec())?;

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)?;
    } else {
        serde_json::to_writer(&mut *writer, &export)?;
    }
    writeln!(writer)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_export_json() {
        let records = vec![
            ExpenseRecord::parse("2024-01-01", "Food", "10.00").unwrap(),
            ExpenseRecord::parse("2024-01-02", "Food", "5.50").unwrap(),
        ];

        let mut out = Vec::new();
        export_json(&mut out, &records, true).unwrap();

        let parsed: LedgerExport = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(parsed.total, Decimal::from_str("15.50").unwrap());
        assert_eq!(parsed.expenses, records);
    }

    #[test]
    fn test_amounts_serialized_as_text() {
        let records = vec![ExpenseRecord::parse("2024-01-01", "Food", "10.10").unwrap()];

        let mut out = Vec::new();
        export_json(&mut out, &records, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"amount\":\"10.10\""));
        assert!(text.contains("\"date\":\"2024-01-01\""));
    }
}
