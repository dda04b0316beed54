//! Glyphs shown on the toggle control.

use serde::{Deserialize, Serialize};

/// The icon displayed on the toggle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Glyph {
    Moon,
    Sun,
}

impl Glyph {
    /// Icon-font classes rendering this glyph.
    pub fn icon_class(&self) -> &'static str {
        match self {
            Glyph::Moon => "fas fa-moon",
            Glyph::Sun => "fas fa-sun",
        }
    }

    /// Plain-text rendering for surfaces without the icon font.
    pub fn symbol(&self) -> &'static str {
        match self {
            Glyph::Moon => "\u{263E}",
            Glyph::Sun => "\u{2600}",
        }
    }

    /// Markup placed inside the control.
    pub fn to_html(&self) -> String {
        format!(r#"<i class="{}"></i>"#, self.icon_class())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_icon_markup() {
        assert_eq!(Glyph::Moon.to_html(), r#"<i class="fas fa-moon"></i>"#);
        assert_eq!(Glyph::Sun.to_html(), r#"<i class="fas fa-sun"></i>"#);
    }

    #[test]
    fn test_glyph_symbols_differ() {
        assert_ne!(Glyph::Moon.symbol(), Glyph::Sun.symbol());
    }
}
