//! JSON profile list reader.
//!
//! The document is an object mapping profile id to profile configuration.
//! Profiles are returned in document order, which is the order they are
//! validated in.

use crate::error::ReadError;
use crate::models::Profile;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Profiles in document order, each with its id filled in.
#[derive(Debug, Default)]
pub struct ProfileList(pub Vec<Profile>);

impl<'de> Deserialize<'de> for ProfileList {
    fn deserialize<D>(deserializer: D) -> Result<ProfileList, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ProfileListVisitor;

        impl<'de> Visitor<'de> for ProfileListVisitor {
            type Value = ProfileList;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a map of profile id to profile configuration")
            }

            fn visit_map<A>(self, mut map: A) -> Result<ProfileList, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut seen = HashSet::new();
                let mut profiles = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(id) = map.next_key::<String>()? {
                    if !seen.insert(id.clone()) {
                        return Err(de::Error::custom(format!("duplicate profile id \"{id}\"")));
                    }
                    let mut profile: Profile = map.next_value()?;
                    profile.id = id;
                    profiles.push(profile);
                }
                Ok(ProfileList(profiles))
            }
        }

        deserializer.deserialize_map(ProfileListVisitor)
    }
}

/// Parse a JSON profile list.
///
/// # Arguments
/// * `json` - The document text
/// * `source_name` - Where the text came from, used in error messages
pub fn parse_profiles(json: &str, source_name: &str) -> Result<Vec<Profile>, ReadError> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let list: ProfileList =
        serde_path_to_error::deserialize(&mut deserializer).map_err(|e| ReadError::Parse {
            source_name: source_name.to_string(),
            json_path: e.path().to_string(),
            message: e.inner().to_string(),
        })?;
    deserializer.end().map_err(|e| ReadError::Parse {
        source_name: source_name.to_string(),
        json_path: ".".to_string(),
        message: e.to_string(),
    })?;

    log::debug!("Parsed {} profile(s) from {source_name}", list.0.len());
    Ok(list.0)
}

/// Read and parse the JSON profile list at `path`.
pub fn read_profiles(path: &Path) -> Result<Vec<Profile>, ReadError> {
    let name = path.display().to_string();
    log::info!("Reading profiles from: {name}");
    let json = std::fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: name.clone(),
        source,
    })?;
    parse_profiles(&json, &name)
}
