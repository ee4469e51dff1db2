//! CLI command for the audit history

use crate::error::LedgerResult;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
pub fn handle_history(storage: &Storage, limit: usize) -> LedgerResult<()> {
    let entries = storage.audit.read_recent(limit)?;

    if entries.is_empty() {
        println!("No history recorded.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    let total = storage.audit.entry_count()?;
    if total > entries.len() {
        println!("({} of {} entries shown)", entries.len(), total);
    }

    Ok(())
}
