//! Overlapping IP range detection.
//!
//! Ranges are checked pairwise against every range seen before them, one
//! list per address family. The number of ranges is small (two per profile)
//! so the quadratic scan is fine.

use crate::error::AddressError;
use crate::models::{Bounds, Cidr, Family};
use std::fmt;

/// First/last address of a range already inserted, with its label.
#[derive(Debug, Clone)]
struct BoundsPair {
    bounds: Bounds,
    label: String,
}

/// Two ranges sharing at least one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapConflict {
    /// The range being inserted when the overlap was found.
    pub range: String,
    /// The earlier range it overlaps with.
    pub overlaps_with: String,
}

impl fmt::Display for OverlapConflict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "IP range {} overlaps with IP range {}",
            self.range, self.overlaps_with
        )
    }
}

/// Accumulates ranges for a single validation run.
#[derive(Debug, Default)]
pub struct OverlapDetector {
    four: Vec<BoundsPair>,
    six: Vec<BoundsPair>,
}

impl OverlapDetector {
    pub fn new() -> OverlapDetector {
        Default::default()
    }

    /// Compare `cidr` with all earlier ranges of its family, then remember it.
    ///
    /// `label` names the range in the report, usually its text as configured.
    pub fn insert_and_check(
        &mut self,
        cidr: &Cidr,
        label: &str,
    ) -> Result<Vec<OverlapConflict>, AddressError> {
        let bounds = cidr.bounds()?;
        log::trace!(
            "{label}: lo={} hi={}",
            bounds.lo.to_bit_string(),
            bounds.hi.to_bit_string()
        );
        let seen = match cidr.family() {
            Family::V4 => &mut self.four,
            Family::V6 => &mut self.six,
        };

        let conflicts: Vec<OverlapConflict> = seen
            .iter()
            .filter(|pair| bounds.intersects(&pair.bounds))
            .map(|pair| OverlapConflict {
                range: label.to_string(),
                overlaps_with: pair.label.clone(),
            })
            .collect();

        for conflict in &conflicts {
            log::debug!("{conflict}");
        }

        seen.push(BoundsPair {
            bounds,
            label: label.to_string(),
        });

        Ok(conflicts)
    }
}

/// Check whether any of the ranges in `addr/prefix` notation overlap.
///
/// Each range is compared with the ones before it, so every overlapping pair
/// is reported once, named after the later range.
///
/// # Examples
/// ```
/// use profile_check::processing::check_overlap;
/// let conflicts = check_overlap(&["10.1.0.0/24", "fd00::/64", "10.1.0.128/25"]).unwrap();
/// assert_eq!(conflicts.len(), 1);
/// assert_eq!(conflicts[0].range, "10.1.0.128/25");
/// assert_eq!(conflicts[0].overlaps_with, "10.1.0.0/24");
/// ```
pub fn check_overlap<S: AsRef<str>>(ranges: &[S]) -> Result<Vec<OverlapConflict>, AddressError> {
    let mut detector = OverlapDetector::new();
    let mut overlap_list = Vec::new();
    for range in ranges {
        let range = range.as_ref();
        let cidr = Cidr::parse(range)?;
        overlap_list.extend(detector.insert_and_check(&cidr, range)?);
    }
    Ok(overlap_list)
}
