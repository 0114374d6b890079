use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Second-resolution timestamp (seconds since UNIX epoch).
///
/// Posts carry two of these: `created_at`, set once, and `updated_at`, which
/// advances on every successful update. Total order follows the raw value.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from raw epoch seconds.
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// The zero timestamp (epoch).
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Raw epoch seconds.
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// The strictly-greater successor (saturating).
    pub const fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}s)", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of the current time.
///
/// Implementations must be monotonically non-decreasing: two calls to
/// `now()` never go backwards. The post engine relies on this for
/// `created_at <= updated_at`.
pub trait Clock: Send + Sync {
    /// The current time.
    fn now(&self) -> Timestamp;
}

impl<C: Clock> Clock for std::sync::Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Wall-clock time source, clamped so it never moves backwards even if the
/// system clock is adjusted between calls.
#[derive(Debug, Default)]
pub struct SystemClock {
    floor: AtomicU64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let floor = self.floor.fetch_max(wall, Ordering::AcqRel).max(wall);
        Timestamp::from_secs(floor)
    }
}

/// Manually driven clock for tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Create a manual clock starting at the given epoch seconds.
    pub fn starting_at(secs: u64) -> Self {
        Self {
            now: AtomicU64::new(secs),
        }
    }

    /// Set the current time. Panics if this would move the clock backwards.
    pub fn set(&self, secs: u64) {
        let prev = self.now.swap(secs, Ordering::AcqRel);
        assert!(prev <= secs, "manual clock moved backwards");
    }

    /// Advance the clock by the given number of seconds.
    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::AcqRel);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_secs(self.now.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_seconds() {
        assert!(Timestamp::from_secs(100) < Timestamp::from_secs(200));
        assert_eq!(Timestamp::from_secs(5), Timestamp::from_secs(5));
    }

    #[test]
    fn next_is_strictly_greater() {
        let t = Timestamp::from_secs(41);
        assert!(t.next() > t);
        assert_eq!(t.next().as_secs(), 42);
    }

    #[test]
    fn next_saturates_at_max() {
        let t = Timestamp::from_secs(u64::MAX);
        assert_eq!(t.next(), t);
    }

    #[test]
    fn system_clock_produces_reasonable_timestamp() {
        let clock = SystemClock::new();
        // Should be after 2020-01-01 (1577836800 s)
        assert!(clock.now().as_secs() > 1_577_836_800);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(a <= b);
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::starting_at(1000);
        assert_eq!(clock.now().as_secs(), 1000);
        clock.advance(5);
        assert_eq!(clock.now().as_secs(), 1005);
    }

    #[test]
    #[should_panic(expected = "backwards")]
    fn manual_clock_rejects_regression() {
        let clock = ManualClock::starting_at(1000);
        clock.set(999);
    }

    #[test]
    fn serde_roundtrip() {
        let t = Timestamp::from_secs(1234567890);
        let json = serde_json::to_string(&t).unwrap();
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(t, parsed);
    }
}
