//! One-shot timers with cancellable handles.
//!
//! The controller never runs a delayed step itself: it asks a [`Scheduler`]
//! for a [`TimerId`], and whoever owns the clock hands the [`TimerTask`] back
//! through [`ThemeController::run_timer`](crate::ThemeController::run_timer)
//! once it is due.

use std::time::Duration;

use crate::theme::ThemeMode;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Deferred steps of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Show the action glyph for the given mode and reset rotation
    SwapGlyph(ThemeMode),
    /// Drop the root transition style
    ClearTransition,
}

/// Source of one-shot timers.
pub trait Scheduler {
    /// Schedules `task` to be handed back after `delay`.
    fn schedule(&mut self, delay: Duration, task: TimerTask) -> TimerId;

    /// Cancels a pending timer. Unknown or already fired handles are ignored.
    fn cancel(&mut self, id: TimerId);
}

#[derive(Debug, Clone)]
struct Entry {
    id: TimerId,
    due: Duration,
    task: TimerTask,
}

/// A scheduler driven by an explicit virtual clock.
///
/// Time only moves when [`advance`](Self::advance) is called, which makes
/// timer interleavings deterministic.
#[derive(Debug, Clone, Default)]
pub struct VirtualScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<Entry>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers not yet fired or cancelled.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Time until the earliest pending timer, if any.
    pub fn next_due(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|entry| entry.due.saturating_sub(self.now))
            .min()
    }

    /// Moves the clock forward and returns the timers that became due,
    /// ordered by deadline and then by scheduling order.
    pub fn advance(&mut self, by: Duration) -> Vec<(TimerId, TimerTask)> {
        self.now += by;
        let now = self.now;
        let (mut due, rest): (Vec<Entry>, Vec<Entry>) =
            self.pending.drain(..).partition(|entry| entry.due <= now);
        self.pending = rest;
        due.sort_by_key(|entry| (entry.due, entry.id));
        due.into_iter().map(|entry| (entry.id, entry.task)).collect()
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Entry {
            id,
            due: self.now + delay,
            task,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|entry| entry.id != id);
    }
}
