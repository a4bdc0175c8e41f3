// Chunk: docs/chunks/suggestion_debounce - Cancel-on-supersede suggestion debouncing
//!
//! Debouncing for suggestion requests.
//!
//! Each keystroke or cursor move schedules a request. A request only becomes
//! ready once the debounce window has passed without a newer one; a newer
//! request cancels the pending one outright rather than merging with it.
//!
//! This is a pure data structure with no I/O. Callers pass the current
//! `Instant` in, which keeps it testable.

use std::time::{Duration, Instant};

/// Default debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 150;

/// Holds at most one pending request.
#[derive(Debug)]
pub struct Debouncer<T> {
    pending: Option<(T, Instant)>,
    window: Duration,
    cancelled: u64,
}

impl<T> Debouncer<T> {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            pending: None,
            window: Duration::from_millis(debounce_ms),
            cancelled: 0,
        }
    }

    /// Creates a debouncer with the default window.
    pub fn with_default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }

    /// Schedules `request` at `now`, returning the request it cancelled.
    pub fn schedule(&mut self, request: T, now: Instant) -> Option<T> {
        let superseded = self.pending.replace((request, now)).map(|(old, _)| old);
        if superseded.is_some() {
            self.cancelled += 1;
        }
        superseded
    }

    /// Takes the pending request if its window has elapsed.
    pub fn take_ready(&mut self, now: Instant) -> Option<T> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.window);
        if ready {
            self.pending.take().map(|(request, _)| request)
        } else {
            None
        }
    }

    /// Drops the pending request.
    pub fn cancel(&mut self) -> Option<T> {
        let cancelled = self.pending.take().map(|(request, _)| request);
        if cancelled.is_some() {
            self.cancelled += 1;
        }
        cancelled
    }

    /// Time until the pending request becomes ready.
    pub fn time_until_ready(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, at)| self.window.saturating_sub(now.saturating_duration_since(*at)))
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|(request, _)| request)
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    /// Requests cancelled since construction.
    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::with_default()
    }
}
