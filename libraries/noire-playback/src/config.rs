//! Player configuration
//!
//! Defaults reproduce the production rules; a TOML file and `NOIRE__`-prefixed
//! environment variables can override them
//! (e.g. `NOIRE__POLICY__SKIP_LIMIT=5`).

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Free-tier skip and ad rules
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PolicyConfig {
    /// Skips allowed before a lockout
    #[serde(default = "default_skip_limit")]
    pub skip_limit: u32,

    /// Length of a lockout
    #[serde(default = "default_lockout_duration_ms")]
    pub lockout_duration_ms: u64,

    /// An ad runs on every n-th counted skip
    #[serde(default = "default_ad_every_skips")]
    pub ad_every_skips: u32,

    /// An ad runs on every n-th completed track
    #[serde(default = "default_ad_every_tracks")]
    pub ad_every_tracks: u32,

    /// Length of the ad interstitial
    #[serde(default = "default_ad_duration_ms")]
    pub ad_duration_ms: u64,

    /// Audio played during the interstitial, if any
    #[serde(default = "default_ad_asset")]
    pub ad_asset: Option<String>,
}

/// Top-level player configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Key of the skip-policy blob in durable storage
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Fixed shuffle seed (reproducible sessions), random when unset
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

impl PlayerConfig {
    /// Load configuration from an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(config::File::from(path));
            }
        }

        // Override with environment variables (prefixed with NOIRE__)
        settings = settings.add_source(
            config::Environment::with_prefix("NOIRE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: PlayerConfig = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.policy.validate()?;
        if self.storage_key.trim().is_empty() {
            return Err(PlaybackError::Config("storage_key must not be empty".to_string()));
        }
        Ok(())
    }
}

impl PolicyConfig {
    /// Validate cadences and limits
    pub fn validate(&self) -> Result<()> {
        if self.skip_limit == 0 {
            return Err(PlaybackError::Config("skip_limit must be at least 1".to_string()));
        }
        if self.ad_every_skips == 0 || self.ad_every_tracks == 0 {
            return Err(PlaybackError::Config(
                "ad cadences must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// Default values
fn default_skip_limit() -> u32 {
    10
}

fn default_lockout_duration_ms() -> u64 {
    30 * 60 * 1000
}

fn default_ad_every_skips() -> u32 {
    3
}

fn default_ad_every_tracks() -> u32 {
    3
}

fn default_ad_duration_ms() -> u64 {
    5_000
}

fn default_ad_asset() -> Option<String> {
    Some("/assets/audio/noire-ad.mp3".to_string())
}

fn default_storage_key() -> String {
    "noire_skip_policy".to_string()
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            skip_limit: default_skip_limit(),
            lockout_duration_ms: default_lockout_duration_ms(),
            ad_every_skips: default_ad_every_skips(),
            ad_every_tracks: default_ad_every_tracks(),
            ad_duration_ms: default_ad_duration_ms(),
            ad_asset: default_ad_asset(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            policy: PolicyConfig::default(),
            storage_key: default_storage_key(),
            shuffle_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_production_rules() {
        let config = PlayerConfig::default();
        assert_eq!(config.policy.skip_limit, 10);
        assert_eq!(config.policy.lockout_duration_ms, 1_800_000);
        assert_eq!(config.policy.ad_every_skips, 3);
        assert_eq!(config.policy.ad_every_tracks, 3);
        assert_eq!(config.policy.ad_duration_ms, 5_000);
        assert_eq!(config.storage_key, "noire_skip_policy");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_cadence_is_rejected() {
        let mut config = PlayerConfig::default();
        config.policy.ad_every_tracks = 0;
        assert!(matches!(config.validate(), Err(PlaybackError::Config(_))));

        let mut config = PlayerConfig::default();
        config.policy.skip_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "storage_key = \"device_policy\"\nshuffle_seed = 9\n\n[policy]\nskip_limit = 5\nad_asset = \"/ads/short.mp3\""
        )
        .unwrap();

        let config = PlayerConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.storage_key, "device_policy");
        assert_eq!(config.shuffle_seed, Some(9));
        assert_eq!(config.policy.skip_limit, 5);
        assert_eq!(config.policy.ad_asset.as_deref(), Some("/ads/short.mp3"));
        assert_eq!(config.policy.ad_every_skips, 3);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = PlayerConfig::load(Some(Path::new("/nonexistent/noire.toml"))).unwrap();
        assert_eq!(config.policy.skip_limit, 10);
    }
}
