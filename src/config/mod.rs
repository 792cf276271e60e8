//! Configuration management for the extractor tag.
//!
//! Configuration is loaded from host settings under the "response-extractor"
//! key, merged with defaults, validated, and kept in a process-wide singleton.

pub mod schema;

pub use schema::{ConfigError, ExtractorConfig};

use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::RwLock;

/// Settings key holding the extractor configuration.
pub const SETTINGS_KEY: &str = "response-extractor";

/// Global configuration instance.
static CONFIG: Lazy<RwLock<ExtractorConfig>> =
    Lazy::new(|| RwLock::new(ExtractorConfig::default()));

/// Loads configuration from a host settings object.
///
/// Settings that fail to deserialize are logged and ignored in favour of the
/// defaults. Settings that deserialize but fail validation are rejected and
/// leave the global configuration unchanged.
///
/// # Example
///
/// ```no_run
/// use response_extractor::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "response-extractor": {
///         "defaultTrigger": "no-history",
///         "defaultMaxAgeSecs": 300
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.default_max_age_secs, 300.0);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<ExtractorConfig, ConfigError> {
    let mut config = ExtractorConfig::default();

    if let Some(user_settings) = settings_json.as_ref().and_then(|s| s.get(SETTINGS_KEY)) {
        match serde_json::from_value::<ExtractorConfig>(user_settings.clone()) {
            Ok(user_config) => config = config.merge(&user_config),
            Err(e) => {
                log::warn!(
                    "Failed to parse {} settings: {}. Using defaults.",
                    SETTINGS_KEY,
                    e
                );
            }
        }
    }

    config.validate()?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Gets a copy of the current global configuration.
pub fn get_config() -> ExtractorConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| ExtractorConfig::default())
}

/// Updates the global configuration in place.
///
/// An update that leaves the configuration invalid resets it to defaults.
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut ExtractorConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            log::warn!("Configuration validation failed after update: {}", e);
            *config = ExtractorConfig::default();
        }
    }
}

/// Resets the global configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = ExtractorConfig::default();
    }
}
