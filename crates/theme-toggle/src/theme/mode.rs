//! The two-valued theme mode.

use serde::{Deserialize, Serialize};

use super::glyph::Glyph;

/// A named visual mode applied to the page root.
///
/// Serializes as the lowercase strings stored under the preference key and
/// written to the root attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Returns the attribute/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Returns the opposite mode.
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Returns the glyph advertising the action available in this mode.
    ///
    /// A light page shows the moon ("switch to dark"), a dark page the sun.
    pub fn action_glyph(self) -> Glyph {
        match self {
            ThemeMode::Light => Glyph::Moon,
            ThemeMode::Dark => Glyph::Sun,
        }
    }

    /// Parses a stored or attribute value, `None` for anything illegal.
    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}

/// Error returned when a string is neither `light` nor `dark`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError {
    pub value: String,
}

impl std::fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not a theme mode (expected light or dark)", self.value)
    }
}

impl std::error::Error for ParseModeError {}

impl std::str::FromStr for ThemeMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(ParseModeError {
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_default_is_light() {
        assert_eq!(ThemeMode::default(), ThemeMode::Light);
    }

    #[test]
    fn test_mode_toggled() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
    }

    #[test]
    fn test_mode_action_glyph() {
        assert_eq!(ThemeMode::Light.action_glyph(), Glyph::Moon);
        assert_eq!(ThemeMode::Dark.action_glyph(), Glyph::Sun);
    }

    #[test]
    fn test_mode_parse_trims() {
        assert_eq!(ThemeMode::parse(" dark\n"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse("light"), Some(ThemeMode::Light));
    }

    #[test]
    fn test_mode_parse_rejects_unknown() {
        assert_eq!(ThemeMode::parse("Dark"), None);
        assert_eq!(ThemeMode::parse(""), None);
        assert_eq!(ThemeMode::parse("sepia"), None);
    }

    #[test]
    fn test_mode_from_str_error_display() {
        let err = "blue".parse::<ThemeMode>().unwrap_err();
        assert!(err.to_string().contains("blue"));
    }

    #[test]
    fn test_mode_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
        let mode: ThemeMode = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(mode, ThemeMode::Light);
    }
}
