//! Terminal output utilities.
//!
//! One line per finding, prefixed `WARNING:` or `ERROR:`.

use crate::processing::{Advisory, ValidationReport};
use colored::Colorize;
use std::fmt::Display;

/// Format an advisory as a `WARNING: ...` line.
pub fn format_advisory(advisory: &Advisory) -> String {
    format!("{}: {advisory}", "WARNING".yellow().bold())
}

/// Format a fatal error as an `ERROR: ...` line.
pub fn format_error<E: Display + ?Sized>(error: &E) -> String {
    format!("{}: {error}", "ERROR".on_red())
}

/// Print all advisories of `report` to stdout.
pub fn print_report(report: &ValidationReport) {
    for advisory in &report.advisories {
        println!("{}", format_advisory(advisory));
    }
    log::info!(
        "{} profile(s) OK, {} warning(s)",
        report.profiles_checked,
        report.advisories.len()
    );
}

/// Print an error to stderr.
pub fn print_error<E: Display + ?Sized>(error: &E) {
    eprintln!("{}", format_error(error));
}
