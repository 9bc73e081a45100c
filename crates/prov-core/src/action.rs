//! # Provenance Action Tags
//!
//! `Action` and `ActionResult` label what a commit records about an
//! asset's history. Both are closed enums with an explicit `Custom`
//! escape variant: recognized tags get a typed variant, anything else is
//! carried verbatim rather than rejected, so histories written by newer
//! tooling still deserialize.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// What a commit did to the asset's provenance record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// First anchoring of the asset.
    InitialRegistration,
    /// A subsequent metadata revision.
    MetadataUpdate,
    /// Forward-compatible escape for unrecognized tags.
    Custom(String),
}

impl Action {
    /// The wire string for this action.
    pub fn as_str(&self) -> &str {
        match self {
            Self::InitialRegistration => "initial-registration",
            Self::MetadataUpdate => "metadata-update",
            Self::Custom(s) => s,
        }
    }
}

impl From<&str> for Action {
    fn from(s: &str) -> Self {
        match s {
            "initial-registration" => Self::InitialRegistration,
            "metadata-update" => Self::MetadataUpdate,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s.as_str()))
    }
}

/// The outcome a commit asserts for its action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionResult {
    /// The action completed as recorded.
    Success,
    /// The action was attempted and rejected.
    Rejected,
    /// Forward-compatible escape for unrecognized tags.
    Custom(String),
}

impl ActionResult {
    /// The wire string for this result.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Rejected => "rejected",
            Self::Custom(s) => s,
        }
    }
}

impl From<&str> for ActionResult {
    fn from(s: &str) -> Self {
        match s {
            "success" => Self::Success,
            "rejected" => Self::Rejected,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl std::fmt::Display for ActionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ActionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActionResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s.as_str()))
    }
}
