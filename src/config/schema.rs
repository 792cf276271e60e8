//! Configuration schema for the extractor tag.
//!
//! Settings are read from the host settings under the "response-extractor"
//! key. They only provide defaults for arguments a user left blank; values
//! entered on a tag always win.

use crate::trigger::TriggerPolicy;
use serde::{Deserialize, Serialize};

/// Error returned when a configuration fails validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("defaultMaxAgeSecs must be a finite number, got {0}")]
    NonFiniteMaxAge(f64),
}

/// User-configurable defaults for the extractor tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractorConfig {
    /// Trigger policy used when a tag does not specify one.
    ///
    /// Defaults to `never`.
    #[serde(default)]
    pub default_trigger: TriggerPolicy,

    /// Max age in seconds used when a `when-expired` tag has none.
    ///
    /// Defaults to 60. Must be finite; negative values are allowed and make
    /// every recorded response count as expired.
    #[serde(default = "default_max_age_secs")]
    pub default_max_age_secs: f64,

    /// Whether falling back to lossy UTF-8 while decoding a body is logged.
    ///
    /// Defaults to true.
    #[serde(default = "default_log_decode_fallbacks")]
    pub log_decode_fallbacks: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            default_trigger: TriggerPolicy::default(),
            default_max_age_secs: default_max_age_secs(),
            log_decode_fallbacks: default_log_decode_fallbacks(),
        }
    }
}

impl ExtractorConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_max_age_secs.is_finite() {
            return Err(ConfigError::NonFiniteMaxAge(self.default_max_age_secs));
        }
        Ok(())
    }

    /// Merges this configuration with another, using values from `other`.
    pub fn merge(&self, other: &ExtractorConfig) -> Self {
        Self {
            default_trigger: other.default_trigger,
            default_max_age_secs: other.default_max_age_secs,
            log_decode_fallbacks: other.log_decode_fallbacks,
        }
    }
}

fn default_max_age_secs() -> f64 {
    60.0
}

fn default_log_decode_fallbacks() -> bool {
    true
}
