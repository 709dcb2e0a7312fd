//! Consistency checks for VPN server profiles.
//!
//! Verifies that profile numbers and listener endpoints are unique, that every
//! client range leaves room for one subnet per OpenVPN process, and warns
//! about deprecated settings and overlapping IPv4/IPv6 ranges.

pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

use error::CheckError;
use processing::ValidationReport;
use std::path::{Path, PathBuf};

pub use processing::{check_overlap, validate_profiles};

/// Pick the profile list to check: the command line argument, then
/// `PROFILE_CHECK_CONFIG`, then `profiles.json`.
pub fn profile_path(arg: Option<String>) -> PathBuf {
    arg.or_else(|| std::env::var(config::CONFIG_ENV_VAR).ok())
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_PROFILE_FILE))
}

/// Read the profile list at `path` and validate it.
pub fn check_profile_file(path: &Path) -> Result<ValidationReport, CheckError> {
    let profiles = input::read_profiles(path)?;
    let report = validate_profiles(&profiles)?;
    Ok(report)
}
