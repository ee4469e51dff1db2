//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the application state.

pub mod expense;
pub mod export;
pub mod history;

pub use expense::{
    handle_add, handle_delete, handle_list, handle_plot, handle_summary, DeleteArgs, SortArgs,
    SortColumn,
};
pub use export::{handle_export, ExportFormat};
pub use history::handle_history;
