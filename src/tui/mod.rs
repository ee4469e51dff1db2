//! Terminal chart viewer
//!
//! Shows the category totals as a bar chart in the terminal's alternate
//! screen until the user dismisses it.

pub mod chart;
pub mod terminal;

pub use chart::{render_category_chart, run_chart};
