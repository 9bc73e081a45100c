//! # License Model
//!
//! A license on an `AssetTree` is either a named preset or an inline
//! custom body. On the wire a preset is a bare string and a custom
//! license is an object, matching how the two are configured.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::error::LicenseError;

/// The named license presets the stack ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LicensePreset {
    /// CC0 1.0, public-domain dedication.
    Cc0,
    /// CC BY 4.0, attribution.
    CcBy4,
    /// CC BY-SA 4.0, attribution + share-alike.
    CcBySa4,
    /// CC BY-NC 4.0, attribution + non-commercial.
    CcByNc4,
    /// No reuse granted.
    AllRightsReserved,
}

impl LicensePreset {
    /// The canonical preset name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cc0 => "CC0-1.0",
            Self::CcBy4 => "CC-BY-4.0",
            Self::CcBySa4 => "CC-BY-SA-4.0",
            Self::CcByNc4 => "CC-BY-NC-4.0",
            Self::AllRightsReserved => "All-Rights-Reserved",
        }
    }

    /// Every preset, for listings and validation messages.
    pub fn all() -> [LicensePreset; 5] {
        [
            Self::Cc0,
            Self::CcBy4,
            Self::CcBySa4,
            Self::CcByNc4,
            Self::AllRightsReserved,
        ]
    }
}

impl FromStr for LicensePreset {
    type Err = LicenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| LicenseError::UnknownPreset(s.to_string()))
    }
}

impl std::fmt::Display for LicensePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LicensePreset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LicensePreset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// An inline custom license carried verbatim in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LicenseBody {
    /// Display name of the license.
    pub name: String,
    /// Full license terms.
    pub terms: String,
}

/// A license value on an `AssetTree`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum License {
    /// A named preset, serialized as its bare name string.
    Preset(LicensePreset),
    /// An inline custom body, serialized as an object.
    Custom(LicenseBody),
}

impl std::fmt::Display for License {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preset(p) => f.write_str(p.as_str()),
            Self::Custom(body) => write!(f, "custom ({})", body.name),
        }
    }
}
