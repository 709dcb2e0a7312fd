//! Reading profile lists.
//!
//! - [`reader`] - JSON profile list parsing

mod reader;

pub use reader::{parse_profiles, read_profiles, ProfileList};
