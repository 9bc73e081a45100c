//! # Workspace Configuration
//!
//! Identities, license choice, and signing seed for one workspace.
//! The config is opaque to the engine's algorithms except for its
//! enumerated effects: identities flow into drafts, the license choice
//! is re-resolved on every `add`, and the seed goes to the signing
//! service without the engine ever interpreting it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use prov_core::{License, LicenseBody, LicensePreset};

use crate::error::EngineError;

/// The configured license: a preset by name, or an inline custom body.
///
/// On disk this is `{"preset": "CC-BY-4.0"}` or
/// `{"custom": {"name": ..., "terms": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseChoice {
    /// Named preset, resolved to its full structure on every `add`.
    Preset(String),
    /// Inline custom body, substituted verbatim.
    Custom(LicenseBody),
}

/// Per-workspace configuration, stored as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// Identity recorded as the asset's author.
    pub author: String,
    /// Identity recorded as the committer.
    pub committer: String,
    /// Identity of the hosting provider.
    pub provider: String,
    /// Active license choice.
    pub license: LicenseChoice,
    /// 32-byte hex seed for the signing key. Handed to the signing
    /// service, never interpreted here.
    pub signing_seed: String,
}

impl WorkspaceConfig {
    /// Resolve the configured license choice into a full license value.
    ///
    /// A preset name becomes the full preset structure; a custom choice
    /// passes its body through verbatim. Unknown preset names are a
    /// configuration error, reported before any network access.
    pub fn resolve_license(&self) -> Result<License, EngineError> {
        match &self.license {
            LicenseChoice::Preset(name) => LicensePreset::from_str(name)
                .map(License::Preset)
                .map_err(|e| EngineError::Config(e.to_string())),
            LicenseChoice::Custom(body) => Ok(License::Custom(body.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(license: LicenseChoice) -> WorkspaceConfig {
        WorkspaceConfig {
            author: "alice".to_string(),
            committer: "alice".to_string(),
            provider: "pinning.example".to_string(),
            license,
            signing_seed: "00".repeat(32),
        }
    }

    #[test]
    fn test_resolve_preset() {
        let config = config_with(LicenseChoice::Preset("CC-BY-4.0".to_string()));
        assert_eq!(
            config.resolve_license().unwrap(),
            License::Preset(LicensePreset::CcBy4)
        );
    }

    #[test]
    fn test_resolve_unknown_preset_is_config_error() {
        let config = config_with(LicenseChoice::Preset("GPL-9".to_string()));
        assert!(matches!(
            config.resolve_license(),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn test_resolve_custom_passes_body_verbatim() {
        let body = LicenseBody {
            name: "House Rules".to_string(),
            terms: "ask first".to_string(),
        };
        let config = config_with(LicenseChoice::Custom(body.clone()));
        assert_eq!(config.resolve_license().unwrap(), License::Custom(body));
    }

    #[test]
    fn test_config_json_shape() {
        let config = config_with(LicenseChoice::Preset("CC0-1.0".to_string()));
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""license":{"preset":"CC0-1.0"}"#));
        let back: WorkspaceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let json = r#"{
            "author": "a", "committer": "a", "provider": "p",
            "license": {"preset": "CC0-1.0"},
            "signing_seed": "00",
            "surprise": true
        }"#;
        assert!(serde_json::from_str::<WorkspaceConfig>(json).is_err());
    }
}
