use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

/// Default epoch: Monday, March 27, 2017 06:22:17 UTC
///
/// The epoch the original deployment of this scheme anchored to. Any fleet
/// must agree on a single epoch for its IDs to sort correctly against each
/// other.
pub const DEFAULT_EPOCH: Duration = Duration::from_secs(1_490_595_737);

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: Duration = Duration::from_millis(1_288_834_974_657);

/// Standard UNIX epoch: Thursday, January 1, 1970 00:00:00 UTC
pub const UNIX_EPOCH_START: Duration = Duration::from_millis(0);

/// A source of millisecond timestamps measured from a configured epoch.
///
/// This abstraction allows plugging in the real system clock or a mocked
/// time source in tests.
///
/// # Example
///
/// ```
/// use rimeid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the source's epoch.
    fn current_millis(&self) -> u64;
}

/// A wall-clock time source offset from a fixed epoch.
///
/// Every call reads `SystemTime::now()`, so external clock adjustments (NTP
/// steps, manual changes) remain visible to callers. [`IdWorker`] relies on
/// that visibility to detect a backward jump and reject the call instead of
/// silently reissuing a past millisecond.
///
/// Readings earlier than the configured epoch saturate to zero.
///
/// [`IdWorker`]: crate::IdWorker
#[derive(Clone, Debug)]
pub struct SystemClock {
    epoch_ms: u64,
}

impl SystemClock {
    /// Constructs a wall clock using a custom epoch as the origin (t = 0),
    /// specified as a [`Duration`] since 1970-01-01 UTC.
    ///
    /// # Example
    ///
    /// ```
    /// use rimeid::{DEFAULT_EPOCH, SystemClock, TimeSource};
    ///
    /// let clock = SystemClock::with_epoch(DEFAULT_EPOCH);
    /// assert!(clock.current_millis() > 0);
    /// ```
    pub const fn with_epoch(epoch: Duration) -> Self {
        Self {
            epoch_ms: epoch.as_millis() as u64,
        }
    }
}

impl Default for SystemClock {
    /// Constructs a wall clock aligned to the [`DEFAULT_EPOCH`].
    fn default() -> Self {
        Self::with_epoch(DEFAULT_EPOCH)
    }
}

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before UNIX_EPOCH");
        (now.as_millis() as u64).saturating_sub(self.epoch_ms)
    }
}
