//! Trailing-edge debouncer
//!
//! Coalesces rapid updates: every [`Debouncer::push`] replaces the pending
//! value and restarts the quiescence window; [`Debouncer::poll`] hands the
//! latest value out once the window has elapsed with no further input.
//! A superseded value is simply dropped.
//!
//! Time is passed in explicitly, so callers drive it from their event loop
//! and tests drive it with synthetic instants.

use std::time::{Duration, Instant};

/// Quiescence window used for search input unless configured otherwise
pub const DEFAULT_QUIESCENCE: Duration = Duration::from_millis(100);

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Trailing-edge coalescing of rapid updates
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record an input at `now`, superseding any pending one
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.window,
        });
    }

    /// Take the pending value if its window has elapsed at `now`
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Take the pending value immediately, ignoring the window
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drop the pending value without committing it
    pub fn discard(&mut self) {
        self.pending = None;
    }

    /// When the pending value becomes due, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIESCENCE)
    }
}
