//! File I/O utilities with atomic rewrites
//!
//! The ledger is a plain line-oriented text file. Appends go straight to the
//! file; full rewrites go through a temp file and a rename so a failure
//! never leaves a truncated ledger behind.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::LedgerError;

/// Create an empty file (and its parent directories) if it doesn't exist
pub fn ensure_file<P: AsRef<Path>>(path: P) -> Result<(), LedgerError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                LedgerError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LedgerError::Storage(format!("Failed to create {}: {}", path.display(), e)))?;

    Ok(())
}

/// Read all lines from a file, returning an empty list if it doesn't exist
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>, LedgerError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| LedgerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    BufReader::new(file)
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| LedgerError::Storage(format!("Failed to read {}: {}", path.display(), e)))
}

/// Append a single line (a trailing newline is added)
pub fn append_line<P: AsRef<Path>>(path: P, line: &str) -> Result<(), LedgerError> {
    let path = path.as_ref();

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LedgerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    writeln!(file, "{}", line)
        .map_err(|e| LedgerError::Storage(format!("Failed to write {}: {}", path.display(), e)))?;

    file.flush()
        .map_err(|e| LedgerError::Storage(format!("Failed to flush {}: {}", path.display(), e)))?;

    Ok(())
}

/// Replace a file's contents atomically (write to temp, then rename)
///
/// The file is either completely rewritten or not modified at all.
pub fn write_lines_atomic<P, S>(path: P, lines: &[S]) -> Result<(), LedgerError>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let path = path.as_ref();

    // Temp file must live in the same directory for the rename to be atomic
    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let file = File::create(&temp_path)
        .map_err(|e| LedgerError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line.as_ref()).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            LedgerError::Storage(format!("Failed to write temp file: {}", e))
        })?;
    }

    writer
        .flush()
        .map_err(|e| LedgerError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LedgerError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        LedgerError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
