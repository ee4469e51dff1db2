//! Audit logging
//!
//! Every add and delete against the ledger is recorded in an append-only
//! audit log next to it, so removed expenses can still be traced.
//!
//! - `AuditEntry`: a single entry with timestamp, operation and the record.
//! - `AuditLogger`: writes entries as line-delimited JSON (JSONL).

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
