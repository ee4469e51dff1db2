//! Service layer
//!
//! Business logic sitting between the command handlers and storage.

pub mod expense;
pub mod view;

pub use expense::{CategorySummary, ExpenseService};
pub use view::{compare_by, sort_view};
