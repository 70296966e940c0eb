//! Configuration management for snapscrub.
//!
//! Configuration loading and validation uses figment, layering TOML config
//! files and environment variables over built-in defaults. The core pipeline
//! itself persists nothing; configuration only shapes a run (languages,
//! custom rules, default redaction style).

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::detect::CustomRule;
use crate::error::{Error, Result};
use crate::ocr::RecognizeOptions;
use crate::redact::RedactionStyle;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "snapscrub";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `SNAPSCRUB_`)
/// 2. TOML config file at `~/.config/snapscrub/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Detection configuration.
    pub detection: DetectionConfig,
    /// Redaction configuration.
    pub redaction: RedactionConfig,
}

/// Detection-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Recognition languages requested from the OCR backend, in preference
    /// order.
    pub languages: Vec<String>,
    /// Skip recognized blocks below this confidence. Zero disables the
    /// filter.
    pub min_confidence: f32,
    /// Additional user rules appended to the built-in catalog.
    pub custom_rules: Vec<CustomRule>,
}

/// Redaction-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedactionConfig {
    /// Default obscuring style when the CLI does not specify one.
    pub style: RedactionStyle,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            languages: vec!["en-US".to_string()],
            min_confidence: 0.0,
            custom_rules: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("SNAPSCRUB_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// Invalid custom rule patterns are *not* an error here: they are
    /// reported by [`Config::invalid_custom_rules`] and dropped with a
    /// warning when the detector is built, so a bad pattern never blocks a
    /// run.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.detection.min_confidence) {
            return Err(Error::config_validation(format!(
                "min_confidence ({}) must be within [0.0, 1.0]",
                self.detection.min_confidence
            )));
        }

        if self.detection.languages.is_empty() {
            return Err(Error::config_validation(
                "languages must list at least one recognition language",
            ));
        }

        Ok(())
    }

    /// The custom rules whose patterns do not compile, with the reason.
    #[must_use]
    pub fn invalid_custom_rules(&self) -> Vec<(String, String)> {
        self.detection
            .custom_rules
            .iter()
            .filter_map(|rule| {
                regex::Regex::new(&rule.pattern)
                    .err()
                    .map(|e| (rule.pattern.clone(), e.to_string()))
            })
            .collect()
    }

    /// The recognition options implied by this configuration.
    #[must_use]
    pub fn recognize_options(&self) -> RecognizeOptions {
        RecognizeOptions {
            languages: self.detection.languages.clone(),
            ..RecognizeOptions::default()
        }
    }
}
