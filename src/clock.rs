use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Wall-clock source for the history log and the stream loop.
///
/// Production code uses [`SystemClock`]; tests inject a [`ManualClock`] so
/// throttle behavior can be checked without real timers.
pub trait Clock: Send {
    fn now(&self) -> SystemTime;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Hand-driven clock. Clones share the same underlying time, so a test can
/// keep a handle while the log owns the other.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now_ms: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(since_epoch: Duration) -> Self {
        Self {
            now_ms: Arc::new(AtomicU64::new(since_epoch.as_millis() as u64)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now_ms
            .fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn set(&self, since_epoch: Duration) {
        self.now_ms
            .store(since_epoch.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(self.now_ms.load(Ordering::SeqCst))
    }
}
