use std::sync::atomic::{AtomicI64, Ordering};

/// Source of the current time for asset naming.
pub trait Clock: Send + Sync {
    /// Milliseconds since the unix epoch.
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Deterministic clock for tests. Each reading advances by `step` millis
/// (zero by default).
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicI64,
    step: i64,
}

impl FixedClock {
    pub fn new(now_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(now_millis),
            step: 0,
        }
    }

    pub fn ticking(now_millis: i64, step: i64) -> Self {
        Self {
            now: AtomicI64::new(now_millis),
            step,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.now.fetch_add(self.step, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticking_clock_advances_per_reading() {
        let clock = FixedClock::ticking(100, 5);
        assert_eq!(clock.now_millis(), 100);
        assert_eq!(clock.now_millis(), 105);
        assert_eq!(FixedClock::new(7).now_millis(), 7);
    }
}
