//! CIDR range notation.

use super::address::{range_bounds, AddressBits, Family};
use crate::error::AddressError;
use std::fmt;

/// An address block such as `10.0.0.0/24` or `fd00::/64`.
///
/// The address does not have to be the network address; `10.0.0.7/24` covers
/// the same block as `10.0.0.0/24`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cidr {
    address: AddressBits,
    prefix: u8,
}

/// Inclusive first and last address of a [`Cidr`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Bounds {
    pub lo: AddressBits,
    pub hi: AddressBits,
}

impl Bounds {
    /// True when the two blocks share at least one address.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.lo.family() == other.lo.family() && self.lo <= other.hi && other.lo <= self.hi
    }
}

impl Cidr {
    pub fn new(address: AddressBits, prefix: u8) -> Result<Cidr, AddressError> {
        if prefix > address.width() {
            return Err(AddressError::InvalidPrefix {
                prefix,
                width: address.width(),
            });
        }
        Ok(Cidr { address, prefix })
    }

    /// Parse `address/prefix`, detecting the family from the address.
    ///
    /// # Examples
    /// ```
    /// use profile_check::models::{Cidr, Family};
    /// let c = Cidr::parse("10.0.0.0/24").unwrap();
    /// assert_eq!(c.family(), Family::V4);
    /// assert_eq!(c.prefix(), 24);
    /// ```
    pub fn parse(text: &str) -> Result<Cidr, AddressError> {
        let text = text.trim();
        let address = text.split('/').next().unwrap_or_default();
        Cidr::parse_family(text, Family::detect(address))
    }

    /// Parse `address/prefix` where the address must be of `family`.
    pub fn parse_family(text: &str, family: Family) -> Result<Cidr, AddressError> {
        let text = text.trim();
        let parts: Vec<&str> = text.split('/').collect();
        if parts.len() != 2 {
            return Err(AddressError::InvalidCidr(text.to_string()));
        }
        let address = AddressBits::encode(parts[0], family)?;
        let digits = parts[1];
        if digits.is_empty()
            || !digits.bytes().all(|b| b.is_ascii_digit())
            || (digits.len() > 1 && digits.starts_with('0'))
        {
            return Err(AddressError::InvalidCidr(text.to_string()));
        }
        let prefix: u8 = digits
            .parse()
            .map_err(|_| AddressError::InvalidCidr(text.to_string()))?;
        Cidr::new(address, prefix)
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn family(&self) -> Family {
        self.address.family()
    }

    /// First (network) and last address of the block.
    pub fn bounds(&self) -> Result<Bounds, AddressError> {
        let (lo, hi) = range_bounds(self.address, self.prefix)?;
        Ok(Bounds { lo, hi })
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let c = Cidr::parse("10.1.0.128/25").unwrap();
        assert_eq!(c.family(), Family::V4);
        assert_eq!(c.prefix(), 25);
        assert_eq!(c.to_string(), "10.1.0.128/25");

        let c = Cidr::parse(" fd00:4242:4242:1194::/64 ").unwrap();
        assert_eq!(c.family(), Family::V6);
        assert_eq!(c.prefix(), 64);
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(
            Cidr::parse("10.0.0.0").unwrap_err(),
            AddressError::InvalidCidr("10.0.0.0".to_string())
        );
        assert!(Cidr::parse("10.0.0.0/24/1").is_err());
        assert!(Cidr::parse("10.0.0.0/").is_err());
        assert!(Cidr::parse("10.0.0.0/-1").is_err());
        assert!(Cidr::parse("10.0.0.0/+8").is_err());
        assert_eq!(
            Cidr::parse("10.0.0.0/024").unwrap_err(),
            AddressError::InvalidCidr("10.0.0.0/024".to_string())
        );
        assert!(Cidr::parse("fd00::/064").is_err());
        assert_eq!(Cidr::parse("0.0.0.0/0").unwrap().prefix(), 0);
        assert!(Cidr::parse("10.0.0/24").is_err());
        assert_eq!(
            Cidr::parse("10.0.0.0/33").unwrap_err(),
            AddressError::InvalidPrefix {
                prefix: 33,
                width: 32
            }
        );
        assert!(Cidr::parse("fd00::/129").is_err());
        assert!(Cidr::parse("10.0.0.0/999").is_err());
    }

    #[test]
    fn test_parse_family_mismatch() {
        assert!(Cidr::parse_family("fd00::/64", Family::V4).is_err());
        assert!(Cidr::parse_family("10.0.0.0/24", Family::V6).is_err());
    }

    #[test]
    fn test_bounds() {
        let b = Cidr::parse("10.0.0.7/24").unwrap().bounds().unwrap();
        assert_eq!(b.lo.to_string(), "10.0.0.0");
        assert_eq!(b.hi.to_string(), "10.0.0.255");
        assert!(b.lo <= b.hi);
    }

    #[test]
    fn test_intersects() {
        let bounds = |s: &str| Cidr::parse(s).unwrap().bounds().unwrap();
        assert!(bounds("10.1.0.0/24").intersects(&bounds("10.1.0.128/25")));
        assert!(bounds("10.1.0.64/26").intersects(&bounds("10.1.0.0/24")));
        assert!(!bounds("10.0.0.0/25").intersects(&bounds("10.0.0.128/25")));
        assert!(!bounds("0.0.0.0/0").intersects(&bounds("::/0")));
    }
}
