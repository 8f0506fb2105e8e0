//! Skill configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `MISSIVE`
//! prefix and `__` (double underscore) separating nested keys.
//!
//! # Example
//!
//! ```no_run
//! use missive::config::SkillConfig;
//!
//! let config = SkillConfig::load().expect("Failed to load configuration");
//! println!("formatting numbers for {}", config.region);
//! ```

mod error;

pub use error::ConfigError;

use phonenumber::country;
use serde::Deserialize;
use tracing::warn;

/// Root skill configuration.
///
/// Every field has a default, so an empty environment yields a working
/// skill: English vocabulary, US number formatting, no draft expiry.
#[derive(Debug, Clone, Deserialize)]
pub struct SkillConfig {
    /// Language tag for vocabulary and dialog selection.
    #[serde(default = "default_language")]
    pub language: String,

    /// ISO region used when formatting phone numbers for readback.
    #[serde(default = "default_region")]
    pub region: String,

    /// Draft lifecycle policy.
    #[serde(default)]
    pub draft: DraftConfig,
}

/// Draft lifecycle configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftConfig {
    /// Seconds an untouched draft stays live.
    ///
    /// Unset disables expiry, matching the skill's historical behavior
    /// of keeping abandoned drafts indefinitely.
    /// (`MISSIVE__DRAFT__TTL_SECS=900` reaps after fifteen minutes.)
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

fn default_language() -> String {
    "en-us".to_string()
}

fn default_region() -> String {
    "US".to_string()
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            region: default_region(),
            draft: DraftConfig::default(),
        }
    }
}

impl SkillConfig {
    /// Loads configuration from the environment.
    ///
    /// Reads a `.env` file if present (development convenience), then
    /// environment variables like `MISSIVE__REGION` and
    /// `MISSIVE__DRAFT__TTL_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a value cannot be parsed into its
    /// expected type or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("MISSIVE").separator("__"))
            .build()?;
        let config: SkillConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for values that cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.language.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "language",
                reason: "cannot be empty".to_string(),
            });
        }
        if self.region.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "region",
                reason: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// The phone-formatting region, falling back to US with a warning
    /// when the configured region is not one the skill ships with.
    pub fn region_id(&self) -> country::Id {
        match self.region.to_ascii_uppercase().as_str() {
            "US" => country::US,
            "CA" => country::CA,
            "GB" => country::GB,
            "AU" => country::AU,
            other => {
                warn!(region = other, "unsupported region, defaulting to US");
                country::US
            }
        }
    }

    /// The draft time-to-live, when expiry is enabled.
    pub fn draft_ttl(&self) -> Option<chrono::Duration> {
        self.draft
            .ttl_secs
            .map(|secs| chrono::Duration::seconds(secs as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_expiry_and_use_us_formatting() {
        let config = SkillConfig::default();
        assert_eq!(config.language, "en-us");
        assert_eq!(config.region_id(), country::US);
        assert_eq!(config.draft_ttl(), None);
    }

    #[test]
    fn ttl_seconds_convert_to_a_duration() {
        let config = SkillConfig {
            draft: DraftConfig {
                ttl_secs: Some(900),
            },
            ..SkillConfig::default()
        };
        assert_eq!(config.draft_ttl(), Some(chrono::Duration::seconds(900)));
    }

    #[test]
    fn unknown_regions_fall_back_to_us() {
        let config = SkillConfig {
            region: "ZZ".to_string(),
            ..SkillConfig::default()
        };
        assert_eq!(config.region_id(), country::US);
    }

    #[test]
    fn empty_language_fails_validation() {
        let config = SkillConfig {
            language: "  ".to_string(),
            ..SkillConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
