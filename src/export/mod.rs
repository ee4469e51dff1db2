//! Export module
//!
//! Writes the ledger out in other formats:
//! - CSV: spreadsheet-compatible, header `Date,Category,Amount`
//! - JSON: machine-readable, with schema version and total
//! - YAML: human-readable variant of the JSON export

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{read_expenses_csv, write_expenses_csv, CSV_HEADER};
pub use json::{export_json, LedgerExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;
