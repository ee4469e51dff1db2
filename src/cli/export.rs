//! CLI commands for data export
//!
//! CSV holds the rows only; JSON and YAML carry the schema version and the
//! total alongside them.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::app::App;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_json, export_yaml};
use crate::services::ExpenseService;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Date,Category,Amount rows with a header
    Csv,
    /// Full ledger as JSON
    Json,
    /// Full ledger as YAML
    Yaml,
}

/// Write the ledger to `output` in the requested format
pub fn handle_export(
    app: &mut App<'_>,
    output: &Path,
    format: ExportFormat,
    pretty: bool,
) -> LedgerResult<()> {
    let rows = match format {
        ExportFormat::Csv => app.export(output)?,
        ExportFormat::Json | ExportFormat::Yaml => {
            let records = ExpenseService::new(app.storage).list()?;

            let file = File::create(output).map_err(|e| {
                LedgerError::Export(format!(
                    "Failed to create file {}: {}",
                    output.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(file);

            if format == ExportFormat::Json {
                export_json(&mut writer, &records, pretty)?;
            } else {
                export_yaml(&mut writer, &records)?;
            }
            writer.flush()?;

            records.len()
        }
    };

    println!("Expenses exported to {}! ({} rows)", output.display(), rows);
    Ok(())
}
