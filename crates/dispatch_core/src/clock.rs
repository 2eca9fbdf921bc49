use chrono::{DateTime, Utc};

/// Time source for schedule computation.
///
/// Injected rather than read ambiently so the empty-queue arrival offset
/// is computed from one pinned instant and tests can replay schedules
/// deterministically.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed time source for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct ManualClock {
    now: DateTime<Utc>,
}

impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
