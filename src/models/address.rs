//! Fixed-width address encoding.
//!
//! Provides [`AddressBits`], the canonical big-endian bit representation of an
//! IPv4 (32 bit) or IPv6 (128 bit) address, and [`range_bounds`] for the first
//! and last address of a prefix.

use crate::error::AddressError;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Maximum prefix length for an IPv4 address (32 bits).
pub const V4_WIDTH: u8 = 32;
/// Maximum prefix length for an IPv6 address (128 bits).
pub const V6_WIDTH: u8 = 128;

/// Address family.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Bit width of an address of this family.
    pub fn width(self) -> u8 {
        match self {
            Family::V4 => V4_WIDTH,
            Family::V6 => V6_WIDTH,
        }
    }

    /// Guess the family from presentation form: anything with a ':' is IPv6.
    pub fn detect(address: &str) -> Family {
        if address.contains(':') {
            Family::V6
        } else {
            Family::V4
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Family::V4 => write!(f, "IPv4"),
            Family::V6 => write!(f, "IPv6"),
        }
    }
}

/// An address as a fixed-width unsigned integer, most significant bit first.
///
/// IPv4 addresses only use the low 32 bits. Values of the same family compare
/// numerically, which is the same as comparing their bit strings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddressBits {
    family: Family,
    bits: u128,
}

impl AddressBits {
    /// Encode a presentation-form address of the given family.
    ///
    /// # Examples
    /// ```
    /// use profile_check::models::{AddressBits, Family};
    /// let a = AddressBits::encode("10.0.0.1", Family::V4).unwrap();
    /// assert_eq!(a.bits(), 0x0A00_0001);
    /// assert!(AddressBits::encode("10.0.0.1", Family::V6).is_err());
    /// ```
    pub fn encode(address: &str, family: Family) -> Result<AddressBits, AddressError> {
        let invalid = || AddressError::InvalidAddress {
            family,
            address: address.to_string(),
        };
        let bits = match family {
            Family::V4 => u32::from(address.parse::<Ipv4Addr>().map_err(|_| invalid())?) as u128,
            Family::V6 => u128::from(address.parse::<Ipv6Addr>().map_err(|_| invalid())?),
        };
        Ok(AddressBits { family, bits })
    }

    /// Build from a raw value. Bits above the family width are dropped.
    pub fn from_bits(family: Family, bits: u128) -> AddressBits {
        let bits = match family {
            Family::V4 => bits & u32::MAX as u128,
            Family::V6 => bits,
        };
        AddressBits { family, bits }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn width(&self) -> u8 {
        self.family.width()
    }

    pub fn bits(&self) -> u128 {
        self.bits
    }

    /// The address as a string of '0'/'1' exactly `width()` characters long.
    pub fn to_bit_string(&self) -> String {
        format!("{:0width$b}", self.bits, width = self.width() as usize)
    }

    pub fn to_ip_addr(&self) -> IpAddr {
        match self.family {
            Family::V4 => IpAddr::V4(Ipv4Addr::from(self.bits as u32)),
            Family::V6 => IpAddr::V6(Ipv6Addr::from(self.bits)),
        }
    }
}

impl fmt::Display for AddressBits {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_ip_addr())
    }
}

/// Mask with the lowest `width - prefix` bits set.
fn host_mask(width: u8, prefix: u8) -> u128 {
    let host_bits = (width - prefix) as u32;
    if host_bits >= 128 {
        u128::MAX
    } else {
        (1u128 << host_bits) - 1
    }
}

/// Inclusive first and last address of `address/prefix`.
///
/// The first keeps the leading `prefix` bits and zeroes the rest, the last
/// sets the rest to one.
pub fn range_bounds(
    address: AddressBits,
    prefix: u8,
) -> Result<(AddressBits, AddressBits), AddressError> {
    let width = address.width();
    if prefix > width {
        return Err(AddressError::InvalidPrefix { prefix, width });
    }
    let mask = host_mask(width, prefix);
    let lo = AddressBits::from_bits(address.family, address.bits & !mask);
    let hi = AddressBits::from_bits(address.family, address.bits | mask);
    Ok((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_v4() {
        let a = AddressBits::encode("192.168.1.42", Family::V4).unwrap();
        assert_eq!(a.bits(), 0xC0A8_012A);
        assert_eq!(a.to_bit_string(), "11000000101010000000000100101010");
        assert_eq!(a.to_bit_string().len(), 32);
    }

    #[test]
    fn test_encode_v6() {
        let a = AddressBits::encode("fd00::1", Family::V6).unwrap();
        assert_eq!(a.bits(), 0xfd00_0000_0000_0000_0000_0000_0000_0001);
        let s = a.to_bit_string();
        assert_eq!(s.len(), 128);
        assert!(s.starts_with("11111101"));
        assert!(s.ends_with("0001"));
    }

    #[test]
    fn test_encode_canonical() {
        // Different spellings of the same address encode identically.
        let a = AddressBits::encode("2001:db8::1", Family::V6).unwrap();
        let b = AddressBits::encode("2001:0DB8:0:0:0:0:0:0001", Family::V6).unwrap();
        assert_eq!(a, b);
        let c = AddressBits::encode("2001:db8::2", Family::V6).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_encode_invalid() {
        assert_eq!(
            AddressBits::encode("10.0.0.256", Family::V4).unwrap_err(),
            AddressError::InvalidAddress {
                family: Family::V4,
                address: "10.0.0.256".to_string()
            }
        );
        assert!(AddressBits::encode("::1", Family::V4).is_err());
        assert!(AddressBits::encode("10.0.0.1", Family::V6).is_err());
        assert!(AddressBits::encode("", Family::V6).is_err());
    }

    #[test]
    fn test_detect_family() {
        assert_eq!(Family::detect("10.0.0.0"), Family::V4);
        assert_eq!(Family::detect("fd00::"), Family::V6);
        assert_eq!(Family::detect("::ffff:10.0.0.1"), Family::V6);
    }

    #[test]
    fn test_range_bounds_v4() {
        let a = AddressBits::encode("10.1.2.3", Family::V4).unwrap();
        let (lo, hi) = range_bounds(a, 24).unwrap();
        assert_eq!(lo.to_string(), "10.1.2.0");
        assert_eq!(hi.to_string(), "10.1.2.255");

        let (lo, hi) = range_bounds(a, 32).unwrap();
        assert_eq!(lo, a);
        assert_eq!(hi, a);

        let (lo, hi) = range_bounds(a, 0).unwrap();
        assert_eq!(lo.to_string(), "0.0.0.0");
        assert_eq!(hi.to_string(), "255.255.255.255");
    }

    #[test]
    fn test_range_bounds_v6() {
        let a = AddressBits::encode("fd00:4242:4242::1", Family::V6).unwrap();
        let (lo, hi) = range_bounds(a, 48).unwrap();
        assert_eq!(lo.to_string(), "fd00:4242:4242::");
        assert_eq!(hi.to_string(), "fd00:4242:4242:ffff:ffff:ffff:ffff:ffff");

        let (lo, hi) = range_bounds(a, 0).unwrap();
        assert_eq!(lo.bits(), 0);
        assert_eq!(hi.bits(), u128::MAX);

        let (lo, hi) = range_bounds(a, 128).unwrap();
        assert_eq!(lo, a);
        assert_eq!(hi, a);
    }

    #[test]
    fn test_range_bounds_bit_strings() {
        let a = AddressBits::encode("10.0.0.200", Family::V4).unwrap();
        let (lo, hi) = range_bounds(a, 25).unwrap();
        let prefix = &a.to_bit_string()[..25];
        assert_eq!(lo.to_bit_string(), format!("{prefix}0000000"));
        assert_eq!(hi.to_bit_string(), format!("{prefix}1111111"));
        assert!(lo <= hi);
        assert!(lo <= a && a <= hi);
    }

    #[test]
    fn test_range_bounds_invalid_prefix() {
        let a = AddressBits::encode("10.0.0.0", Family::V4).unwrap();
        assert_eq!(
            range_bounds(a, 33).unwrap_err(),
            AddressError::InvalidPrefix {
                prefix: 33,
                width: 32
            }
        );
        let b = AddressBits::encode("::", Family::V6).unwrap();
        assert!(range_bounds(b, 129).is_err());
    }
}
