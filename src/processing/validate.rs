//! Profile consistency checks.
//!
//! Walks the profile list once, in the order given. Structural violations
//! stop the walk with a [`FatalError`]; deprecated settings and overlapping
//! ranges are collected as [`Advisory`] entries in the returned
//! [`ValidationReport`].

use super::overlap::{OverlapConflict, OverlapDetector};
use crate::config;
use crate::error::FatalError;
use crate::models::{Cidr, Family, Profile};
use std::collections::HashMap;
use std::fmt;

/// A finding that does not block deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// The profile still sets "dnsSuffix".
    DeprecatedDnsSuffix { profile_id: String },
    /// Two configured ranges share addresses.
    RangeOverlap(OverlapConflict),
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Advisory::DeprecatedDnsSuffix { profile_id } => write!(
                f,
                "\"dnsSuffix\" in profile \"{profile_id}\" is deprecated. Please use \"dnsDomain\" and \"dnsDomainSearch\" instead"
            ),
            Advisory::RangeOverlap(conflict) => write!(f, "{conflict}"),
        }
    }
}

/// Outcome of a run without fatal violations.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub profiles_checked: usize,
    pub advisories: Vec<Advisory>,
}

impl ValidationReport {
    /// True when there is nothing to warn about.
    pub fn is_clean(&self) -> bool {
        self.advisories.is_empty()
    }

    pub fn overlaps(&self) -> impl Iterator<Item = &OverlapConflict> {
        self.advisories.iter().filter_map(|a| match a {
            Advisory::RangeOverlap(c) => Some(c),
            _ => None,
        })
    }
}

/// Network bits needed to give each of `processes` server processes its own
/// subnet: `ceil(log2(processes))`.
pub fn prefix_space(processes: usize) -> u8 {
    if processes <= 1 {
        0
    } else {
        (usize::BITS - (processes - 1).leading_zeros()) as u8
    }
}

/// State of one validation run.
///
/// Not reusable after `check_profile` fails: state recorded before the
/// failing check stays behind.
#[derive(Debug, Default)]
pub(crate) struct ProfileValidator {
    /// profileNumber -> profile that claimed it first
    profile_numbers: HashMap<u32, String>,
    /// "listen -> proto/port" -> profile that claimed it first
    listeners: HashMap<String, String>,
    detector: OverlapDetector,
    advisories: Vec<Advisory>,
    overlaps: Vec<OverlapConflict>,
    profiles_checked: usize,
}

impl ProfileValidator {
    pub(crate) fn new() -> ProfileValidator {
        Default::default()
    }

    /// Run all per-profile checks for `profile`.
    pub(crate) fn check_profile(&mut self, profile: &Profile) -> Result<(), FatalError> {
        log::debug!("Checking profile '{}'", profile.id);

        self.check_profile_number(profile)?;
        self.check_listeners(profile)?;

        let processes = profile.vpn_proto_ports.len();
        if processes == 0 {
            return Err(FatalError::EmptyProtoPorts {
                profile_id: profile.id.clone(),
            });
        }
        let space = prefix_space(processes);

        let range = parse_range(profile, "range", &profile.range, Family::V4)?;
        let max_prefix = config::MAX_PREFIX_V4.saturating_sub(space);
        if range.prefix() > max_prefix {
            return Err(FatalError::RangeTooSmall {
                profile_id: profile.id.clone(),
                prefix: range.prefix(),
                max_prefix,
                processes,
            });
        }

        let range6 = parse_range(profile, "range6", &profile.range6, Family::V6)?;
        if range6.prefix() % config::PREFIX_V6_ALIGN != 0 {
            return Err(FatalError::Range6NotNibbleAligned {
                profile_id: profile.id.clone(),
                prefix: range6.prefix(),
            });
        }
        let max_prefix6 = config::MAX_PREFIX_V6.saturating_sub(space);
        if range6.prefix() > max_prefix6 {
            return Err(FatalError::Range6TooSmall {
                profile_id: profile.id.clone(),
                prefix: range6.prefix(),
                max_prefix: max_prefix6,
                processes,
            });
        }

        if profile.dns_suffix.iter().any(|s| !s.is_empty()) {
            let advisory = Advisory::DeprecatedDnsSuffix {
                profile_id: profile.id.clone(),
            };
            log::warn!("{advisory}");
            self.advisories.push(advisory);
        }

        for (field, cidr, text) in [
            ("range", &range, &profile.range),
            ("range6", &range6, &profile.range6),
        ] {
            let found = self
                .detector
                .insert_and_check(cidr, text.trim())
                .map_err(|source| FatalError::InvalidRange {
                    profile_id: profile.id.clone(),
                    field,
                    source,
                })?;
            self.overlaps.extend(found);
        }

        self.profiles_checked += 1;
        Ok(())
    }

    fn check_profile_number(&mut self, profile: &Profile) -> Result<(), FatalError> {
        if let Some(first) = self.profile_numbers.get(&profile.profile_number) {
            return Err(FatalError::DuplicateProfileNumber {
                number: profile.profile_number,
                profile_id: profile.id.clone(),
                first_profile_id: first.clone(),
            });
        }
        self.profile_numbers
            .insert(profile.profile_number, profile.id.clone());
        Ok(())
    }

    fn check_listeners(&mut self, profile: &Profile) -> Result<(), FatalError> {
        let listeners = profile
            .listeners()
            .map_err(|source| FatalError::InvalidListen {
                profile_id: profile.id.clone(),
                source,
            })?;
        for listener in listeners {
            if let Some(first) = self.listeners.get(&listener) {
                return Err(FatalError::DuplicateListener {
                    listener,
                    profile_id: profile.id.clone(),
                    first_profile_id: first.clone(),
                });
            }
            self.listeners.insert(listener, profile.id.clone());
        }
        Ok(())
    }

    /// Turn the collected overlaps into advisories and close the run.
    pub(crate) fn finish(mut self) -> ValidationReport {
        for conflict in self.overlaps {
            log::warn!("{conflict}");
            self.advisories.push(Advisory::RangeOverlap(conflict));
        }
        ValidationReport {
            profiles_checked: self.profiles_checked,
            advisories: self.advisories,
        }
    }
}

fn parse_range(
    profile: &Profile,
    field: &'static str,
    text: &str,
    family: Family,
) -> Result<Cidr, FatalError> {
    Cidr::parse_family(text, family).map_err(|source| FatalError::InvalidRange {
        profile_id: profile.id.clone(),
        field,
        source,
    })
}

/// Validate a profile list, stopping at the first fatal violation.
///
/// # Returns
/// * `Ok(ValidationReport)` - no fatal violation, possibly with advisories
/// * `Err(FatalError)` - the first violation found
pub fn validate_profiles(profiles: &[Profile]) -> Result<ValidationReport, FatalError> {
    log::info!("Validating {} profile(s)", profiles.len());

    let mut validator = ProfileValidator::new();
    for profile in profiles {
        validator.check_profile(profile).inspect_err(|e| {
            log::error!("{e}");
        })?;
    }
    let report = validator.finish();

    log::info!(
        "Validated {} profile(s), {} warning(s)",
        report.profiles_checked,
        report.advisories.len()
    );
    Ok(report)
}
