//! Controller configuration.
//!
//! Every field has a default matching the stock page behavior, so an empty
//! document (or no file at all) yields [`ToggleConfig::default`].
//!
//! ```yaml
//! storage_key: site-theme
//! follow_system: false
//! glyph_delay_ms: 100
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::store::DEFAULT_STORAGE_KEY;
use crate::theme::ThemeMode;

/// Default root attribute read by external style rules.
pub const DEFAULT_ATTRIBUTE: &str = "data-theme";

/// Default transition applied to the root while a toggle animates.
pub const DEFAULT_TRANSITION: &str = "background-color 0.5s ease, color 0.5s ease";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToggleConfig {
    pub storage_key: String,
    pub attribute: String,
    /// Mode applied when nothing is stored
    pub default_mode: ThemeMode,
    /// Mirror OS color-scheme changes while no preference is stored
    pub follow_system: bool,
    pub transition: String,
    /// Delay before the glyph swap, from toggle time
    pub glyph_delay_ms: u64,
    /// Delay before the transition is cleared, from toggle time
    pub transition_ms: u64,
    pub label: String,
    pub class_name: String,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            attribute: DEFAULT_ATTRIBUTE.to_string(),
            default_mode: ThemeMode::Light,
            follow_system: true,
            transition: DEFAULT_TRANSITION.to_string(),
            glyph_delay_ms: 150,
            transition_ms: 500,
            label: "Toggle theme".to_string(),
            class_name: "theme-toggle".to_string(),
        }
    }
}

impl ToggleConfig {
    pub fn glyph_delay(&self) -> Duration {
        Duration::from_millis(self.glyph_delay_ms)
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Parses a YAML document.
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON document.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file, choosing the format by extension (`.json`, else YAML).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&source),
            _ => Self::from_yaml(&source),
        }
    }

    /// Checks that names are non-empty and the glyph swap happens before the
    /// transition is cleared.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("storage_key", &self.storage_key),
            ("attribute", &self.attribute),
            ("class_name", &self.class_name),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField(field));
            }
        }
        if self.glyph_delay_ms > self.transition_ms {
            return Err(ConfigError::DelayOrder {
                glyph_delay_ms: self.glyph_delay_ms,
                transition_ms: self.transition_ms,
            });
        }
        Ok(())
    }
}

/// Error returned when a configuration cannot be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io { path: String, message: String },
    Parse(String),
    /// A required name is blank
    EmptyField(&'static str),
    /// The glyph would swap after the transition is removed
    DelayOrder { glyph_delay_ms: u64, transition_ms: u64 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, message } => {
                write!(f, "cannot read config '{}': {}", path, message)
            }
            ConfigError::Parse(message) => write!(f, "invalid config: {}", message),
            ConfigError::EmptyField(field) => write!(f, "config field '{}' must not be empty", field),
            ConfigError::DelayOrder {
                glyph_delay_ms,
                transition_ms,
            } => write!(
                f,
                "glyph_delay_ms ({}) must not exceed transition_ms ({})",
                glyph_delay_ms, transition_ms
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
