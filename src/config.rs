//! Configuration constants.

/// Environment variable naming the profile list to check.
pub const CONFIG_ENV_VAR: &str = "PROFILE_CHECK_CONFIG";

/// Profile list used when neither an argument nor the environment names one.
pub const DEFAULT_PROFILE_FILE: &str = "profiles.json";

/// log4rs configuration file, looked up in the working directory.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

/// Default "listen" address of a profile.
pub const DEFAULT_LISTEN: &str = "::";

/// Default port of the OpenVPN processes of a profile.
pub const DEFAULT_OPENVPN_PORT: u16 = 1194;

/// Largest IPv4 prefix an OpenVPN server process accepts.
pub const MAX_PREFIX_V4: u8 = 29;

/// Largest IPv6 prefix an OpenVPN server process accepts.
pub const MAX_PREFIX_V6: u8 = 112;

/// IPv6 ranges are split per process on nibble boundaries.
pub const PREFIX_V6_ALIGN: u8 = 4;
