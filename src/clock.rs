use std::sync::Mutex;

use time::OffsetDateTime;

/// Source of "now" for timestamps and day rollover.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock in the local offset, falling back to UTC when the offset
/// cannot be determined.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<OffsetDateTime>,
}

impl ManualClock {
    pub fn new(now: OffsetDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: OffsetDateTime) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: time::Duration) {
        let mut guard = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *guard += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn manual_clock_moves_only_when_told() {
        let clock = ManualClock::new(datetime!(2024-01-02 23:59:00 UTC));
        assert_eq!(clock.now(), datetime!(2024-01-02 23:59:00 UTC));

        clock.advance(time::Duration::minutes(2));
        assert_eq!(clock.now(), datetime!(2024-01-03 00:01:00 UTC));

        clock.set(datetime!(2030-06-01 12:00:00 UTC));
        assert_eq!(clock.now().year(), 2030);
    }

    #[test]
    fn system_clock_is_recent() {
        assert!(SystemClock.now().year() >= 2024);
    }
}
