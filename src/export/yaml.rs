//! YAML Export functionality
//!
//! Human-readable variant of the JSON export.

use std::io::Write;

use crate::error::LedgerResult;
use crate::export::json::LedgerExport;
use crate::models::ExpenseRecord;

/// Export records to YAML
pub fn export_yaml<W: Write>(writer: &mut W, records: &[ExpenseRecord]) -> LedgerResult<()> {
    let export = LedgerExport::new(records.to_vec())?;

    writeln!(writer, "# Expense Ledger Export")?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export)?;

    Ok(())
}
