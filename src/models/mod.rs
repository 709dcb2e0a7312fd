//! Domain models for profile checking.
//!
//! This module contains the core data structures:
//! - [`AddressBits`] and [`Family`] - fixed-width address encoding
//! - [`Cidr`] and [`Bounds`] - address blocks and their first/last address
//! - [`Profile`] - a VPN server profile

mod address;
mod cidr;
mod profile;

// Re-export public types
pub use address::{range_bounds, AddressBits, Family, V4_WIDTH, V6_WIDTH};
pub use cidr::{Bounds, Cidr};
pub use profile::{Profile, ProtoPort, Protocol};
