//! Profile validation logic.
//!
//! - [`overlap`] - Pairwise IP range overlap detection
//! - [`validate`] - Per-profile structural checks driving the overlap check

mod overlap;
mod validate;

// Re-export public types and functions
pub use overlap::{check_overlap, OverlapConflict, OverlapDetector};
pub use validate::{prefix_space, validate_profiles, Advisory, ValidationReport};
