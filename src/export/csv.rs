//! CSV Export functionality
//!
//! Writes expense records as a spreadsheet-compatible CSV file with a
//! `Date,Category,Amount` header. Fields are quoted only when needed.

use std::io::Write;

use csv::WriterBuilder;

use crate::error::LedgerResult;
use crate::models::ExpenseRecord;

/// Header row of the CSV export
pub const CSV_HEADER: [&str; 3] = ["Date", "Category", "Amount"];

/// Write records to CSV in the given order
pub fn write_expenses_csv<W: Write>(writer: W, records: &[ExpenseRecord]) -> LedgerResult<()> {
    let mut wrt = WriterBuilder::new().from_writer(writer);

    wrt.write_record(CSV_HEADER)?;
    for record in records {
        wrt.write_record([
            record.date_string(),
            record.category.clone(),
            record.amount.to_string(),
        ])?;
    }

    wrt.flush()?;
    Ok(())
}

/// Read records back from a CSV export
pub fn read_expenses_csv<R: std::io::Read>(reader: R) -> LedgerResult<Vec<ExpenseRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for row in rdr.records() {
        let row = row?;
        records.push(ExpenseRecord::parse(
            row.get(0).unwrap_or_default(),
            row.get(1).unwrap_or_default(),
            row.get(2).unwrap_or_default(),
        )?);
    }

    Ok(records)
}
