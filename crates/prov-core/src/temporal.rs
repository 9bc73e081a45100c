//! # Epoch Timestamps
//!
//! `Timestamp` carries a UTC instant as whole seconds since the Unix
//! epoch, the wire unit of `birthtime` and `timestamp_created`. Sub-second
//! precision is discarded at construction so two records describing the
//! same instant always canonicalize to the same integer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::IdentityError;

/// A UTC instant in whole epoch seconds.
///
/// Serializes as a bare integer, which keeps timestamps canonical without
/// any string-normalization rules. Display renders ISO-8601 for humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    /// Construct from epoch seconds, rejecting values chrono cannot
    /// represent as a date.
    pub fn from_epoch_secs(secs: i64) -> Result<Self, IdentityError> {
        DateTime::from_timestamp(secs, 0)
            .map(|_| Self(secs))
            .ok_or(IdentityError::InvalidTimestamp(secs))
    }

    /// Construct from a `chrono::DateTime<Utc>`, discarding sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp())
    }

    /// Seconds since the Unix epoch.
    pub fn epoch_secs(&self) -> i64 {
        self.0
    }

    /// Render as ISO-8601 with Z suffix, e.g. `2026-01-15T12:00:00Z`.
    pub fn to_iso8601(&self) -> String {
        match DateTime::from_timestamp(self.0, 0) {
            Some(dt) => dt.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            None => format!("{}s", self.0),
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}
