//! # theme-toggle
//!
//! A persisted light/dark theme toggle for pages.
//!
//! `theme-toggle` applies a stored theme to the page root before anything
//! renders, mounts a toggle control once the page is interactive, persists
//! every manual switch, and follows the operating system's color scheme for
//! as long as the user has not chosen one.
//!
//! ## Seams
//!
//! [`ThemeController`] is written against three traits so the same logic runs
//! in the browser, in a terminal driver, and in tests:
//!
//! - [`PreferenceStore`]: origin-scoped key/value storage ([`MemoryStore`], [`FileStore`])
//! - [`Page`]: the root element and the body ([`MemoryPage`])
//! - [`Scheduler`]: one-shot cancellable timers ([`VirtualScheduler`])
//!
//! With the `web` feature on `wasm32`, the `web` module provides the
//! `localStorage`/DOM/`setTimeout` implementations and an `install` entry
//! point.
//!
//! ## Quick Start
//!
//! ```rust
//! use theme_toggle::{MemoryPage, MemoryStore, ThemeController, ThemeMode, ToggleConfig, VirtualScheduler};
//!
//! let store = MemoryStore::new().with("theme", "dark");
//! let mut controller = ThemeController::initialize(
//!     store,
//!     MemoryPage::new(),
//!     VirtualScheduler::new(),
//!     ToggleConfig::default(),
//! );
//! assert_eq!(controller.current_mode(), ThemeMode::Dark);
//!
//! controller.mount_toggle();
//! assert_eq!(controller.toggle().unwrap(), ThemeMode::Light);
//!
//! // Stored preference wins over the operating system.
//! assert!(!controller.on_system_change(ThemeMode::Dark));
//! ```

pub mod config;
pub mod controller;
pub mod page;
pub mod store;
pub mod theme;
pub mod timer;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use config::{ConfigError, ToggleConfig, DEFAULT_ATTRIBUTE, DEFAULT_TRANSITION};
pub use controller::ThemeController;
pub use page::{MemoryPage, Page, ToggleView};
pub use store::{FileStore, MemoryStore, PreferenceStore, StoreError, DEFAULT_STORAGE_KEY};
pub use theme::{
    detect_color_mode, reset_scheme_detector, set_scheme_detector, Glyph, ParseModeError,
    SchemeDetector, ThemeMode,
};
pub use timer::{Scheduler, TimerId, TimerTask, VirtualScheduler};
