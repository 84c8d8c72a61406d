//! Debounced preview recomposition.
//!
//! Composition is pure and idempotent, so this only bounds how often it runs.
//! Time is passed in explicitly to keep the scheduler deterministic.

use std::time::{Duration, Instant};

/// Tracks whether the preview is due for recomposition.
#[derive(Debug, Clone)]
pub struct PreviewScheduler {
    delay: Duration,
    auto_refresh: bool,
    pending_since: Option<Instant>,
    forced: bool,
}

impl PreviewScheduler {
    pub fn new(delay: Duration, auto_refresh: bool) -> Self {
        Self {
            delay,
            auto_refresh,
            pending_since: None,
            forced: false,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    /// Note an edit at `now`. Each edit restarts the delay window.
    pub fn record_edit(&mut self, now: Instant) {
        if self.auto_refresh {
            self.pending_since = Some(now);
        }
    }

    /// Toggle auto-refresh; enabling it schedules a render.
    pub fn set_auto_refresh(&mut self, enabled: bool, now: Instant) {
        self.auto_refresh = enabled;
        self.pending_since = if enabled { Some(now) } else { None };
    }

    /// Request a render on the next poll regardless of the delay ("run").
    pub fn request_now(&mut self) {
        self.forced = true;
    }

    /// Whether a render is due at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        self.forced
            || self
                .pending_since
                .map(|since| now.saturating_duration_since(since) >= self.delay)
                .unwrap_or(false)
    }

    /// Clear pending and forced state after a render outside the debounce.
    pub fn mark_rendered(&mut self) {
        self.pending_since = None;
        self.forced = false;
    }

    /// Consume a due render. Returns `true` when the caller should recompose.
    pub fn take_due(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.mark_rendered();
        true
    }
}
