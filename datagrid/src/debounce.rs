//! Trailing-edge debounce timer.
//!
//! Signals arriving inside the window push the deadline back. The work runs
//! once, after the window elapses with no further signal.

use tokio::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
    collapsed: u32,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            collapsed: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a signal at `now`, superseding any pending one.
    pub fn signal(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
        self.collapsed += 1;
    }

    /// Deadline of the pending run, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// If the pending run is due at `now`, clear it and return how many
    /// signals it collapsed.
    pub fn fire(&mut self, now: Instant) -> Option<u32> {
        match self.deadline {
            Some(deadline) if deadline <= now => Some(self.take()),
            _ => None,
        }
    }

    /// Clear the pending run regardless of its deadline. Returns how many
    /// signals it collapsed, if one was pending.
    pub fn flush(&mut self) -> Option<u32> {
        self.deadline.map(|_| self.take())
    }

    fn take(&mut self) -> u32 {
        self.deadline = None;
        std::mem::take(&mut self.collapsed)
    }
}
