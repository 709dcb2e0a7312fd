//! VPN server profile data model.

use super::address::{AddressBits, Family};
use crate::config;
use crate::error::AddressError;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Regex for `proto/port`, e.g. `udp/1194` or `TCP6/443`.
static PROTO_PORT_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_proto_port_regex() -> &'static Regex {
    PROTO_PORT_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^(udp6?|tcp6?)/([0-9]{1,5})$").expect("Invalid Regex")
    })
}

/// Transport protocol of an OpenVPN server process.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Protocol {
    Udp,
    Tcp,
    Udp6,
    Tcp6,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Protocol::Udp => "udp",
            Protocol::Tcp => "tcp",
            Protocol::Udp6 => "udp6",
            Protocol::Tcp6 => "tcp6",
        };
        write!(f, "{s}")
    }
}

/// One listener of a profile: a protocol and a port.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ProtoPort {
    pub protocol: Protocol,
    pub port: u16,
}

impl FromStr for ProtoPort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = get_proto_port_regex()
            .captures(s.trim())
            .ok_or_else(|| format!("invalid proto/port: {s}"))?;
        let protocol = match caps[1].to_ascii_lowercase().as_str() {
            "udp" => Protocol::Udp,
            "tcp" => Protocol::Tcp,
            "udp6" => Protocol::Udp6,
            _ => Protocol::Tcp6,
        };
        let port: u16 = caps[2]
            .parse()
            .map_err(|_| format!("invalid port in proto/port: {s}"))?;
        if port == 0 {
            return Err(format!("invalid port in proto/port: {s}"));
        }
        Ok(ProtoPort { protocol, port })
    }
}

impl fmt::Display for ProtoPort {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.protocol, self.port)
    }
}

impl Serialize for ProtoPort {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ProtoPort {
    fn deserialize<D>(deserializer: D) -> Result<ProtoPort, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ProtoPort::from_str(&s).map_err(de::Error::custom)
    }
}

fn default_listen() -> String {
    config::DEFAULT_LISTEN.to_string()
}

fn default_proto_ports() -> Vec<ProtoPort> {
    vec![
        ProtoPort {
            protocol: Protocol::Udp,
            port: config::DEFAULT_OPENVPN_PORT,
        },
        ProtoPort {
            protocol: Protocol::Tcp,
            port: config::DEFAULT_OPENVPN_PORT,
        },
    ]
}

/// A VPN server profile as handed to the validator.
///
/// Field names follow the server configuration (`profileNumber`, `range6`,
/// ...). The identifier is the key the profile is stored under, not a field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Unique profile identifier, e.g. "internet".
    #[serde(skip)]
    pub id: String,
    /// Unique small number used to derive per-profile resources.
    pub profile_number: u32,
    /// Address the OpenVPN processes listen on.
    #[serde(default = "default_listen")]
    pub listen: String,
    /// One entry per OpenVPN server process.
    #[serde(default = "default_proto_ports")]
    pub vpn_proto_ports: Vec<ProtoPort>,
    /// IPv4 client range.
    pub range: String,
    /// IPv6 client range.
    pub range6: String,
    /// Deprecated, replaced by "dnsDomain" and "dnsDomainSearch".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dns_suffix: Vec<String>,
}

impl Profile {
    /// Profile with the reader defaults for `listen` and `vpnProtoPorts`.
    pub fn new(id: &str, profile_number: u32, range: &str, range6: &str) -> Profile {
        Profile {
            id: id.to_string(),
            profile_number,
            listen: default_listen(),
            vpn_proto_ports: default_proto_ports(),
            range: range.to_string(),
            range6: range6.to_string(),
            dns_suffix: vec![],
        }
    }

    /// Keys identifying each listener endpoint, `"<listen> -> <proto>/<port>"`.
    ///
    /// The listen address is written in its canonical form, so `::` and
    /// `0:0:0:0:0:0:0:0` give the same key.
    pub fn listeners(&self) -> Result<Vec<String>, AddressError> {
        let listen = self.listen.trim();
        let address = AddressBits::encode(listen, Family::detect(listen))?;
        Ok(self
            .vpn_proto_ports
            .iter()
            .map(|pp| format!("{address} -> {pp}"))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proto_port_parse() {
        let pp: ProtoPort = "udp/1194".parse().unwrap();
        assert_eq!(pp.protocol, Protocol::Udp);
        assert_eq!(pp.port, 1194);

        let pp: ProtoPort = "TCP6/443".parse().unwrap();
        assert_eq!(pp.protocol, Protocol::Tcp6);
        assert_eq!(pp.to_string(), "tcp6/443");
    }

    #[test]
    fn test_proto_port_invalid() {
        assert!("udp".parse::<ProtoPort>().is_err());
        assert!("sctp/1194".parse::<ProtoPort>().is_err());
        assert!("udp/0".parse::<ProtoPort>().is_err());
        assert!("udp/65536".parse::<ProtoPort>().is_err());
        assert!("udp/ 1194".parse::<ProtoPort>().is_err());
        assert!("udp/1194/2".parse::<ProtoPort>().is_err());
    }

    #[test]
    fn test_profile_defaults() {
        let json = r#"{"profileNumber": 2, "range": "10.0.0.0/24", "range6": "fd00::/64"}"#;
        let p: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, "");
        assert_eq!(p.listen, "::");
        assert_eq!(p.vpn_proto_ports.len(), 2);
        assert!(p.dns_suffix.is_empty());
        assert_eq!(p, Profile::new("", 2, "10.0.0.0/24", "fd00::/64"));
    }

    #[test]
    fn test_profile_listeners() {
        let mut p = Profile::new("internet", 1, "10.0.0.0/24", "fd00::/64");
        p.listen = "192.0.2.1".to_string();
        assert_eq!(
            p.listeners().unwrap(),
            vec!["192.0.2.1 -> udp/1194", "192.0.2.1 -> tcp/1194"]
        );
    }

    #[test]
    fn test_profile_listeners_canonical() {
        let mut p = Profile::new("internet", 1, "10.0.0.0/24", "fd00::/64");
        p.listen = "0:0:0:0:0:0:0:0".to_string();
        assert_eq!(p.listeners().unwrap()[0], ":: -> udp/1194");

        p.listen = "2001:DB8:0:0::0001".to_string();
        assert_eq!(p.listeners().unwrap()[1], "2001:db8::1 -> tcp/1194");
    }

    #[test]
    fn test_profile_listeners_not_an_address() {
        let mut p = Profile::new("internet", 1, "10.0.0.0/24", "fd00::/64");
        p.listen = "not-an-ip".to_string();
        assert!(p.listeners().is_err());
        p.listen = "vpn.example.org".to_string();
        assert!(p.listeners().is_err());
    }

    #[test]
    fn test_profile_serialize_keys() {
        let p = Profile::new("internet", 1, "10.0.0.0/24", "fd00::/64");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["profileNumber"], 1);
        assert_eq!(json["vpnProtoPorts"][0], "udp/1194");
        assert!(json.get("dnsSuffix").is_none());
        assert!(json.get("id").is_none());
    }
}
