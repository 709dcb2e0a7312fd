//! Error types for profile checking.
//!
//! - [`AddressError`] - malformed address, prefix or CIDR text
//! - [`FatalError`] - structural violation that aborts a validation run
//! - [`ReadError`] - the profile list could not be read or parsed
//! - [`CheckError`] - anything that stops `check_profile_file`

use crate::models::Family;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid {family} address: {address}")]
    InvalidAddress { family: Family, address: String },

    #[error("invalid prefix length /{prefix} for a {width} bit address")]
    InvalidPrefix { prefix: u8, width: u8 },

    #[error("invalid CIDR format: {0}")]
    InvalidCidr(String),
}

/// A structural violation. The first one found ends the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FatalError {
    #[error(
        "\"profileNumber\" ({number}) in profile \"{profile_id}\" already used by profile \"{first_profile_id}\""
    )]
    DuplicateProfileNumber {
        number: u32,
        profile_id: String,
        first_profile_id: String,
    },

    #[error(
        "listen/vpnProtoPorts combination \"{listener}\" in profile \"{profile_id}\" already used by profile \"{first_profile_id}\""
    )]
    DuplicateListener {
        listener: String,
        profile_id: String,
        first_profile_id: String,
    },

    #[error("\"listen\" in profile \"{profile_id}\" is not an IP address: {source}")]
    InvalidListen {
        profile_id: String,
        #[source]
        source: AddressError,
    },

    #[error("\"vpnProtoPorts\" in profile \"{profile_id}\" MUST NOT be empty")]
    EmptyProtoPorts { profile_id: String },

    #[error(
        "\"range\" /{prefix} in profile \"{profile_id}\" MUST be at least \"/{max_prefix}\" to accommodate {processes} OpenVPN server process(es)"
    )]
    RangeTooSmall {
        profile_id: String,
        prefix: u8,
        max_prefix: u8,
        processes: usize,
    },

    #[error("prefix length /{prefix} of \"range6\" in profile \"{profile_id}\" MUST be divisible by 4")]
    Range6NotNibbleAligned { profile_id: String, prefix: u8 },

    #[error(
        "\"range6\" /{prefix} in profile \"{profile_id}\" MUST be at least \"/{max_prefix}\" to accommodate {processes} OpenVPN server process(es)"
    )]
    Range6TooSmall {
        profile_id: String,
        prefix: u8,
        max_prefix: u8,
        processes: usize,
    },

    #[error("\"{field}\" in profile \"{profile_id}\" is not usable: {source}")]
    InvalidRange {
        profile_id: String,
        field: &'static str,
        #[source]
        source: AddressError,
    },
}

impl FatalError {
    /// The profile that triggered the violation.
    pub fn profile_id(&self) -> &str {
        match self {
            FatalError::DuplicateProfileNumber { profile_id, .. }
            | FatalError::DuplicateListener { profile_id, .. }
            | FatalError::InvalidListen { profile_id, .. }
            | FatalError::EmptyProtoPorts { profile_id }
            | FatalError::RangeTooSmall { profile_id, .. }
            | FatalError::Range6NotNibbleAligned { profile_id, .. }
            | FatalError::Range6TooSmall { profile_id, .. }
            | FatalError::InvalidRange { profile_id, .. } => profile_id,
        }
    }
}

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("error reading profile file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing profiles from {source_name}: path={json_path} error={message}")]
    Parse {
        source_name: String,
        json_path: String,
        message: String,
    },
}

#[derive(Error, Debug)]
pub enum CheckError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Fatal(#[from] FatalError),
}
