use std::time::{Duration, SystemTime};

/// Rate limit for stream-sourced history writes.
///
/// Process-lifetime state only; never persisted. A write is allowed when
/// strictly more than `min_interval` has elapsed since the last recorded
/// write, or when no write has been recorded yet.
#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    last_write: Option<SystemTime>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_write: None,
        }
    }

    /// True when a write at `now` would be allowed. Does not record it.
    pub fn allows(&self, now: SystemTime) -> bool {
        match self.last_write {
            None => true,
            // A clock that moved backwards reads as "interval not elapsed".
            Some(last) => match now.duration_since(last) {
                Ok(elapsed) => elapsed > self.min_interval,
                Err(_) => false,
            },
        }
    }

    /// Records a successful write at `now`.
    pub fn mark(&mut self, now: SystemTime) {
        self.last_write = Some(now);
    }

    /// Forgets the last write, e.g. when a stream source restarts.
    pub fn reset(&mut self) {
        self.last_write = None;
    }
}
