//! Theme vocabulary.
//!
//! This module provides:
//!
//! - [`ThemeMode`]: Light or dark, as stored and as applied to the page root
//! - [`Glyph`]: The action icon shown on the toggle control
//! - [`detect_color_mode`]: The operating system's preferred mode, if it has
//!   one, overridable with [`set_scheme_detector`]

mod detect;
mod glyph;
mod mode;

pub use detect::{detect_color_mode, reset_scheme_detector, set_scheme_detector, SchemeDetector};
pub use glyph::Glyph;
pub use mode::{ParseModeError, ThemeMode};
