//! Trailing-edge debouncing for burst input
//!
//! Each call replaces the pending value and restarts the wait window; the
//! value is released once the window elapses with no further calls. The
//! main loop polls on every tick, so release resolution equals the tick
//! rate.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<T>,
    deadline: Option<Instant>,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
            deadline: None,
        }
    }

    /// Schedule a value, replacing any pending one and restarting the wait
    pub fn call(&mut self, value: T) {
        self.call_at(value, Instant::now());
    }

    pub fn call_at(&mut self, value: T, now: Instant) {
        self.pending = Some(value);
        self.deadline = Some(now + self.wait);
    }

    /// Release the pending value if the wait window has elapsed
    pub fn poll(&mut self) -> Option<T> {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    /// Drop any pending value without invoking it
    pub fn cancel(&mut self) {
        self.pending = None;
        self.deadline = None;
    }
}
