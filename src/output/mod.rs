//! Output formatting for validation results.
//!
//! - [`terminal`] - Terminal output with colors

mod terminal;

pub use terminal::{format_advisory, format_error, print_error, print_report};
