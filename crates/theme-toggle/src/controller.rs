//! The theme controller.
//!
//! A [`ThemeController`] owns a store, a page and a scheduler, and keeps the
//! root attribute, the stored preference and the toggle control consistent.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use theme_toggle::{MemoryPage, MemoryStore, ThemeController, ThemeMode, ToggleConfig, VirtualScheduler};
//!
//! let mut controller = ThemeController::initialize(
//!     MemoryStore::new(),
//!     MemoryPage::new(),
//!     VirtualScheduler::new(),
//!     ToggleConfig::default(),
//! );
//! assert_eq!(controller.current_mode(), ThemeMode::Light);
//!
//! controller.mount_toggle();
//! controller.toggle().unwrap();
//! assert_eq!(controller.stored_mode(), Some(ThemeMode::Dark));
//!
//! controller.advance(Duration::from_millis(500));
//! assert_eq!(controller.pending_timers(), 0);
//! ```

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::ToggleConfig;
use crate::page::{Page, ToggleView};
use crate::store::{PreferenceStore, StoreError};
use crate::theme::{detect_color_mode, ThemeMode};
use crate::timer::{Scheduler, TimerId, TimerTask, VirtualScheduler};

/// Rotation applied to the control while the glyph swap is pending.
const TOGGLE_ROTATION: u16 = 360;

/// Keeps a page's theme, its stored preference and its toggle control in step.
///
/// Generic over where the preference lives (`S`), the page it drives (`P`)
/// and the timers used for the toggle animation (`T`). The mounted control is
/// held here rather than looked up on the page, so it can only be mounted once.
pub struct ThemeController<S, P, T> {
    config: ToggleConfig,
    store: S,
    page: P,
    scheduler: T,
    toggle: Option<ToggleView>,
    pending: Vec<TimerId>,
}

impl<S, P, T> ThemeController<S, P, T>
where
    S: PreferenceStore,
    P: Page,
    T: Scheduler,
{
    /// Applies the stored mode (or the configured default) to the page root.
    ///
    /// Runs before anything else touches the page. Absence of a stored value,
    /// an illegal stored value and an unreadable store all fall back to the
    /// default mode.
    pub fn initialize(store: S, page: P, scheduler: T, config: ToggleConfig) -> Self {
        let mut controller = Self {
            config,
            store,
            page,
            scheduler,
            toggle: None,
            pending: Vec::new(),
        };

        let mode = match controller.stored_raw() {
            Some(raw) => ThemeMode::parse(&raw).unwrap_or_else(|| {
                warn!(value = %raw, key = %controller.config.storage_key, "ignoring illegal stored theme");
                controller.config.default_mode
            }),
            None => controller.config.default_mode,
        };
        controller.apply_attribute(mode);
        debug!(%mode, "theme initialized");
        controller
    }

    /// Creates the toggle control and appends it to the page body.
    ///
    /// The glyph advertises the action available from the current mode.
    /// Mounting again returns the existing control without appending another.
    pub fn mount_toggle(&mut self) -> &ToggleView {
        let view = match self.toggle.take() {
            Some(view) => {
                debug!("toggle already mounted");
                view
            }
            None => {
                let view = ToggleView::new(
                    &self.config.class_name,
                    &self.config.label,
                    self.current_mode().action_glyph(),
                );
                self.page.append_toggle(&view);
                view
            }
        };
        self.toggle.insert(view)
    }

    /// Flips the mode currently applied to the page root.
    ///
    /// The new mode is persisted and applied before this returns; the glyph
    /// swap and the transition cleanup are scheduled. Timers left over from a
    /// previous toggle are cancelled first.
    ///
    /// # Errors
    ///
    /// Returns the store error if the new mode cannot be persisted. The page
    /// is left untouched in that case.
    pub fn toggle(&mut self) -> Result<ThemeMode, StoreError> {
        let mode = self.current_mode().toggled();
        self.store.set(&self.config.storage_key, mode.as_str())?;

        self.cancel_pending();
        self.page.set_root_transition(Some(self.config.transition.as_str()));
        self.apply_attribute(mode);

        if let Some(view) = self.toggle.as_mut() {
            view.rotation = TOGGLE_ROTATION;
            self.page.update_toggle(view);
        }

        let glyph_delay = self.config.glyph_delay();
        let transition_duration = self.config.transition_duration();
        self.schedule(glyph_delay, TimerTask::SwapGlyph(mode));
        self.schedule(transition_duration, TimerTask::ClearTransition);

        debug!(%mode, "theme toggled");
        Ok(mode)
    }

    /// Handles an OS color-scheme change notification.
    ///
    /// Only applies while no preference is stored and system-follow is
    /// enabled; the store is never written. Returns whether the page changed.
    pub fn on_system_change(&mut self, mode: ThemeMode) -> bool {
        if !self.config.follow_system {
            return false;
        }
        if self.stored_raw().is_some() {
            debug!(%mode, "explicit preference stored, ignoring system change");
            return false;
        }

        // A toggle animation still in flight would repaint the old glyph.
        self.cancel_pending();
        self.page.set_root_transition(None);
        self.apply_attribute(mode);
        if let Some(view) = self.toggle.as_mut() {
            view.glyph = mode.action_glyph();
            view.rotation = 0;
            self.page.update_toggle(view);
        }
        debug!(%mode, "following system color scheme");
        true
    }

    /// Asks the scheme detector and follows its answer, see [`on_system_change`].
    ///
    /// Returns `false` when the system exposes no preference.
    ///
    /// [`on_system_change`]: Self::on_system_change
    pub fn sync_with_system(&mut self) -> bool {
        match detect_color_mode() {
            Some(mode) => self.on_system_change(mode),
            None => {
                debug!("no system color scheme available");
                false
            }
        }
    }

    /// Removes the stored preference so system changes are followed again.
    ///
    /// The page keeps its current mode.
    pub fn clear_preference(&mut self) -> Result<(), StoreError> {
        self.store.remove(&self.config.storage_key)?;
        debug!(key = %self.config.storage_key, "stored theme cleared");
        Ok(())
    }

    /// Executes a fired timer. Handles not issued by the latest toggle are ignored.
    pub fn run_timer(&mut self, id: TimerId, task: TimerTask) {
        let Some(index) = self.pending.iter().position(|pending| *pending == id) else {
            debug!(timer = id.raw(), "stale timer ignored");
            return;
        };
        self.pending.remove(index);

        match task {
            TimerTask::SwapGlyph(mode) => {
                if let Some(view) = self.toggle.as_mut() {
                    view.glyph = mode.action_glyph();
                    view.rotation = 0;
                    self.page.update_toggle(view);
                }
            }
            TimerTask::ClearTransition => self.page.set_root_transition(None),
        }
    }

    /// The mode applied to the page root. Anything other than a legal
    /// attribute value reads as light.
    pub fn current_mode(&self) -> ThemeMode {
        self.page
            .root_attribute(&self.config.attribute)
            .and_then(|value| ThemeMode::parse(&value))
            .unwrap_or(ThemeMode::Light)
    }

    /// The stored preference, if one is stored and legal.
    pub fn stored_mode(&self) -> Option<ThemeMode> {
        self.stored_raw().and_then(|raw| ThemeMode::parse(&raw))
    }

    /// The mounted control, `None` until [`mount_toggle`](Self::mount_toggle).
    pub fn toggle_view(&self) -> Option<&ToggleView> {
        self.toggle.as_ref()
    }

    /// Number of scheduled steps that have not run yet.
    pub fn pending_timers(&self) -> usize {
        self.pending.len()
    }

    /// The configuration this controller was initialized with.
    pub fn config(&self) -> &ToggleConfig {
        &self.config
    }

    /// The backing preference store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable store access, e.g. for edits made outside the controller.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// The page being driven.
    pub fn page(&self) -> &P {
        &self.page
    }

    /// The timer source.
    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    /// Mutable timer access, for hosts that drive the scheduler themselves.
    pub fn scheduler_mut(&mut self) -> &mut T {
        &mut self.scheduler
    }

    /// Tears the controller down, e.g. to simulate a page reload.
    pub fn into_parts(self) -> (S, P, T) {
        (self.store, self.page, self.scheduler)
    }

    fn stored_raw(&self) -> Option<String> {
        match self.store.get(&self.config.storage_key) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "cannot read stored theme");
                None
            }
        }
    }

    fn apply_attribute(&mut self, mode: ThemeMode) {
        self.page.set_root_attribute(&self.config.attribute, mode.as_str());
    }

    fn schedule(&mut self, delay: Duration, task: TimerTask) {
        let id = self.scheduler.schedule(delay, task);
        self.pending.push(id);
    }

    fn cancel_pending(&mut self) {
        for id in self.pending.drain(..) {
            self.scheduler.cancel(id);
        }
    }
}

impl<S, P> ThemeController<S, P, VirtualScheduler>
where
    S: PreferenceStore,
    P: Page,
{
    /// Moves virtual time forward, running every step that becomes due.
    /// Returns how many ran.
    pub fn advance(&mut self, by: Duration) -> usize {
        let due = self.scheduler.advance(by);
        let count = due.len();
        for (id, task) in due {
            self.run_timer(id, task);
        }
        count
    }

    /// Runs every pending step, advancing virtual time as far as needed.
    pub fn settle(&mut self) -> usize {
        let mut count = 0;
        while let Some(wait) = self.scheduler.next_due() {
            count += self.advance(wait);
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemoryPage;
    use crate::store::MemoryStore;
    use crate::theme::Glyph;

    type TestController = ThemeController<MemoryStore, MemoryPage, VirtualScheduler>;

    fn controller(store: MemoryStore) -> TestController {
        ThemeController::initialize(
            store,
            MemoryPage::new(),
            VirtualScheduler::new(),
            ToggleConfig::default(),
        )
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_initialize_defaults_to_light() {
        let c = controller(MemoryStore::new());
        assert_eq!(c.page().root_attribute("data-theme").as_deref(), Some("light"));
        assert_eq!(c.stored_mode(), None);
    }

    #[test]
    fn test_initialize_uses_stored_value() {
        let c = controller(MemoryStore::new().with("theme", "dark"));
        assert_eq!(c.current_mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_initialize_ignores_illegal_stored_value() {
        let c = controller(MemoryStore::new().with("theme", "sepia"));
        assert_eq!(c.page().root_attribute("data-theme").as_deref(), Some("light"));
        assert_eq!(c.stored_mode(), None);
    }

    #[test]
    fn test_initialize_uses_configured_default() {
        let config = ToggleConfig {
            default_mode: ThemeMode::Dark,
            ..ToggleConfig::default()
        };
        let c = ThemeController::initialize(MemoryStore::new(), MemoryPage::new(), VirtualScheduler::new(), config);
        assert_eq!(c.current_mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_mount_shows_action_glyph() {
        let mut light = controller(MemoryStore::new());
        assert_eq!(light.mount_toggle().glyph, Glyph::Moon);

        let mut dark = controller(MemoryStore::new().with("theme", "dark"));
        let view = dark.mount_toggle();
        assert_eq!(view.glyph, Glyph::Sun);
        assert_eq!(view.label, "Toggle theme");
        assert_eq!(view.class_name, "theme-toggle");
    }

    #[test]
    fn test_mount_twice_appends_once() {
        let mut c = controller(MemoryStore::new());
        c.mount_toggle();
        c.mount_toggle();
        assert_eq!(c.page().toggles().len(), 1);
    }

    #[test]
    fn test_toggle_sync_effects() {
        let mut c = controller(MemoryStore::new());
        c.mount_toggle();

        assert_eq!(c.toggle().unwrap(), ThemeMode::Dark);
        assert_eq!(c.current_mode(), ThemeMode::Dark);
        assert_eq!(c.stored_mode(), Some(ThemeMode::Dark));
        assert_eq!(c.page().transition(), Some(crate::config::DEFAULT_TRANSITION));

        let view = c.toggle_view().unwrap();
        assert_eq!(view.rotation, 360);
        assert_eq!(view.glyph, Glyph::Moon);
        assert_eq!(c.pending_timers(), 2);
    }

    #[test]
    fn test_toggle_staggered_steps() {
        let mut c = controller(MemoryStore::new());
        c.mount_toggle();
        c.toggle().unwrap();

        assert_eq!(c.advance(ms(149)), 0);
        assert_eq!(c.advance(ms(1)), 1);
        let view = c.toggle_view().unwrap();
        assert_eq!(view.glyph, Glyph::Sun);
        assert_eq!(view.rotation, 0);
        assert_eq!(c.page().toggles()[0].glyph, Glyph::Sun);
        assert!(c.page().transition().is_some());

        assert_eq!(c.advance(ms(350)), 1);
        assert_eq!(c.page().transition(), None);
        assert_eq!(c.pending_timers(), 0);
    }

    #[test]
    fn test_toggle_reads_attribute_not_store() {
        let mut c = controller(MemoryStore::new());
        c.store_mut().set("theme", "dark").unwrap();

        // Page still shows light, so the toggle goes to dark.
        assert_eq!(c.toggle().unwrap(), ThemeMode::Dark);
    }

    #[test]
    fn test_rapid_toggle_cancels_stale_timers() {
        let mut c = controller(MemoryStore::new());
        c.mount_toggle();

        c.toggle().unwrap();
        c.advance(ms(100));
        c.toggle().unwrap();
        assert_eq!(c.pending_timers(), 2);
        assert_eq!(c.scheduler().pending(), 2);

        // The first toggle's glyph swap would have fired at 150ms.
        assert_eq!(c.advance(ms(60)), 0);
        assert_eq!(c.toggle_view().unwrap().glyph, Glyph::Moon);
        assert_eq!(c.toggle_view().unwrap().rotation, 360);

        c.settle();
        assert_eq!(c.toggle_view().unwrap().glyph, Glyph::Moon);
        assert_eq!(c.current_mode(), ThemeMode::Light);
        assert_eq!(c.page().transition(), None);
    }

    #[test]
    fn test_toggle_without_mount() {
        let mut c = controller(MemoryStore::new());
        c.toggle().unwrap();
        assert_eq!(c.settle(), 2);
        assert!(c.page().toggles().is_empty());
    }

    #[test]
    fn test_run_timer_ignores_unknown_handle() {
        let mut c = controller(MemoryStore::new());
        c.mount_toggle();
        c.toggle().unwrap();
        c.run_timer(TimerId::new(42), TimerTask::ClearTransition);
        assert!(c.page().transition().is_some());
        assert_eq!(c.pending_timers(), 2);
    }

    #[test]
    fn test_system_change_follows_when_unset() {
        let mut c = controller(MemoryStore::new());
        c.mount_toggle();

        assert!(c.on_system_change(ThemeMode::Dark));
        assert_eq!(c.current_mode(), ThemeMode::Dark);
        assert_eq!(c.toggle_view().unwrap().glyph, Glyph::Sun);
        assert!(c.store().is_empty());
    }

    #[test]
    fn test_system_change_ignored_after_toggle() {
        let mut c = controller(MemoryStore::new());
        c.mount_toggle();
        c.toggle().unwrap();
        c.toggle().unwrap();

        assert!(!c.on_system_change(ThemeMode::Dark));
        assert_eq!(c.current_mode(), ThemeMode::Light);
    }

    #[test]
    fn test_system_change_ignored_for_illegal_stored_value() {
        let mut c = controller(MemoryStore::new().with("theme", "sepia"));
        assert!(!c.on_system_change(ThemeMode::Dark));
    }

    #[test]
    fn test_system_change_disabled_by_config() {
        let config = ToggleConfig {
            follow_system: false,
            ..ToggleConfig::default()
        };
        let mut c = ThemeController::initialize(MemoryStore::new(), MemoryPage::new(), VirtualScheduler::new(), config);
        assert!(!c.on_system_change(ThemeMode::Dark));
        assert_eq!(c.current_mode(), ThemeMode::Light);
    }

    #[test]
    fn test_system_change_mid_animation_drops_toggle_steps() {
        let mut c = controller(MemoryStore::new());
        c.mount_toggle();
        c.toggle().unwrap();
        c.clear_preference().unwrap();
        assert_eq!(c.pending_timers(), 2);

        assert!(c.on_system_change(ThemeMode::Light));
        assert_eq!(c.pending_timers(), 0);
        assert_eq!(c.scheduler().pending(), 0);
        assert_eq!(c.page().transition(), None);
        let view = c.toggle_view().unwrap();
        assert_eq!(view.glyph, Glyph::Moon);
        assert_eq!(view.rotation, 0);

        assert_eq!(c.advance(ms(500)), 0);
        assert_eq!(c.toggle_view().unwrap().glyph, Glyph::Moon);
    }

    #[test]
    fn test_clear_preference_reenables_system_follow() {
        let mut c = controller(MemoryStore::new());
        c.toggle().unwrap();
        c.clear_preference().unwrap();

        assert_eq!(c.current_mode(), ThemeMode::Dark);
        assert!(c.on_system_change(ThemeMode::Light));
        assert_eq!(c.current_mode(), ThemeMode::Light);
    }

    #[test]
    fn test_custom_key_and_attribute() {
        let config = ToggleConfig {
            storage_key: "site-theme".to_string(),
            attribute: "data-mode".to_string(),
            ..ToggleConfig::default()
        };
        let mut c = ThemeController::initialize(
            MemoryStore::new().with("site-theme", "dark"),
            MemoryPage::new(),
            VirtualScheduler::new(),
            config,
        );
        assert_eq!(c.page().root_attribute("data-mode").as_deref(), Some("dark"));
        c.toggle().unwrap();
        assert_eq!(c.store().get("site-theme").unwrap().as_deref(), Some("light"));
        assert_eq!(c.store().get("theme").unwrap(), None);
    }
}
