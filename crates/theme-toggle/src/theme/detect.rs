//! Operating-system color-scheme detection.
//!
//! The OS is asked through `dark-light`. Platforms that give no signal, and
//! detectors installed with [`set_scheme_detector`] that decline to answer,
//! report `None`; callers then leave the page alone.

use once_cell::sync::Lazy;
use std::sync::Mutex;

use super::mode::ThemeMode;

/// Answers "which scheme does the system prefer?", or `None` when it cannot tell.
pub type SchemeDetector = fn() -> Option<ThemeMode>;

static DETECTOR: Lazy<Mutex<SchemeDetector>> = Lazy::new(|| Mutex::new(query_os));

/// Replaces the process-wide detector, returning the previous one.
///
/// Tests use this to pin a scheme; `|| None` simulates a platform without a
/// color-scheme signal.
pub fn set_scheme_detector(detector: SchemeDetector) -> SchemeDetector {
    let mut current = DETECTOR.lock().unwrap_or_else(|e| e.into_inner());
    std::mem::replace(&mut *current, detector)
}

/// Restores the OS-backed detector.
pub fn reset_scheme_detector() {
    set_scheme_detector(query_os);
}

/// The scheme the system currently prefers, if it exposes one.
pub fn detect_color_mode() -> Option<ThemeMode> {
    let detector = *DETECTOR.lock().unwrap_or_else(|e| e.into_inner());
    detector()
}

#[cfg(not(target_arch = "wasm32"))]
fn query_os() -> Option<ThemeMode> {
    use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};

    Some(match detect_os_theme() {
        OsThemeMode::Dark => ThemeMode::Dark,
        OsThemeMode::Light => ThemeMode::Light,
    })
}

// In the browser the signal arrives through `matchMedia` listeners instead.
#[cfg(target_arch = "wasm32")]
fn query_os() -> Option<ThemeMode> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_detector_override_and_restore() {
        set_scheme_detector(|| Some(ThemeMode::Dark));
        assert_eq!(detect_color_mode(), Some(ThemeMode::Dark));

        let previous = set_scheme_detector(|| None);
        assert_eq!(previous(), Some(ThemeMode::Dark));
        assert_eq!(detect_color_mode(), None);

        reset_scheme_detector();
    }
}
