use core::time::Duration;
use std::thread;

use parking_lot::Mutex;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Error, Result, RimeId, SystemClock, TimeSource, WorkerConfig};

/// Clock-and-sequence state guarded by the worker mutex.
///
/// Both fields must move together: the sequence is only meaningful relative
/// to the millisecond it was issued in, so they share one critical section.
struct WorkerState {
    /// Intra-millisecond counter, `0..=4095`.
    sequence: u64,

    /// Millisecond (since the clock's epoch) of the most recent issued ID.
    /// `None` until the first ID is issued, so a real reading of zero in the
    /// instant following the epoch is never mistaken for prior state.
    last_timestamp: Option<u64>,
}

/// A stateful Snowflake-style ID generator, one per process or shard.
///
/// An `IdWorker` owns an immutable `(worker, datacenter)` identity and the
/// mutable clock state needed to hand out unique [`RimeId`]s. Any number of
/// threads may call [`next_id`] on a shared instance; the whole
/// read-compare-increment-compose sequence runs under a single mutex, which
/// is what makes uniqueness within a worker a hard invariant rather than a
/// probabilistic one.
///
/// # Example
///
/// ```
/// use rimeid::{DEFAULT_EPOCH, IdWorker};
///
/// let worker = IdWorker::new(3, 1, DEFAULT_EPOCH).expect("ids in range");
///
/// let a = worker.next_id().expect("clock did not move backwards");
/// let b = worker.next_id().expect("clock did not move backwards");
/// assert!(a < b);
/// assert_eq!(b.worker_id(), 3);
/// assert_eq!(b.datacenter_id(), 1);
/// ```
///
/// [`next_id`]: IdWorker::next_id
pub struct IdWorker<T = SystemClock>
where
    T: TimeSource,
{
    worker_id: u64,
    datacenter_id: u64,
    time: T,
    state: Mutex<WorkerState>,
}

impl IdWorker<SystemClock> {
    /// Creates a worker that reads the system wall clock, measured from
    /// `epoch` (a [`Duration`] since 1970-01-01 UTC).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkerId`] or [`Error::InvalidDatacenterId`]
    /// if either identity exceeds its 5-bit field. Out-of-range values are
    /// rejected, never clamped: a clamped identity would silently collide
    /// with another worker's.
    pub fn new(worker_id: u64, datacenter_id: u64, epoch: Duration) -> Result<Self> {
        Self::with_clock(worker_id, datacenter_id, SystemClock::with_epoch(epoch))
    }

    /// Creates a worker from a [`WorkerConfig`].
    ///
    /// # Errors
    ///
    /// Same range validation as [`IdWorker::new`].
    pub fn from_config(config: &WorkerConfig) -> Result<Self> {
        Self::new(config.worker_id, config.datacenter_id, config.epoch())
    }
}

impl<T> IdWorker<T>
where
    T: TimeSource,
{
    /// Creates a worker backed by an arbitrary [`TimeSource`].
    ///
    /// Useful for tests and for embedders that already maintain their own
    /// clock. Validation is identical to [`IdWorker::new`].
    pub fn with_clock(worker_id: u64, datacenter_id: u64, time: T) -> Result<Self> {
        if worker_id > RimeId::WORKER_ID_MASK {
            return Err(Error::InvalidWorkerId {
                id: worker_id,
                max: RimeId::WORKER_ID_MASK,
            });
        }
        if datacenter_id > RimeId::DATACENTER_ID_MASK {
            return Err(Error::InvalidDatacenterId {
                id: datacenter_id,
                max: RimeId::DATACENTER_ID_MASK,
            });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(worker_id, datacenter_id, "id worker initialized");

        Ok(Self {
            worker_id,
            datacenter_id,
            time,
            state: Mutex::new(WorkerState {
                sequence: 0,
                last_timestamp: None,
            }),
        })
    }

    /// The worker identity encoded into every generated ID.
    pub const fn worker_id(&self) -> u64 {
        self.worker_id
    }

    /// The datacenter identity encoded into every generated ID.
    pub const fn datacenter_id(&self) -> u64 {
        self.datacenter_id
    }

    /// Generates the next unique ID.
    ///
    /// Reads the clock, advances the sequence, and packs the result, all
    /// under the instance mutex. If the 12-bit sequence is exhausted within
    /// the current millisecond, the call blocks (yielding between clock
    /// reads) until the clock advances; that backpressure bounds a worker to
    /// 4096 IDs per millisecond and is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockMovedBackward`] if the clock reads earlier than
    /// the last issued timestamp, carrying the observed delta. State is left
    /// untouched and nothing is issued; whether to retry, wait out the
    /// discrepancy, or abort is the caller's policy.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<RimeId> {
        let mut state = self.state.lock();
        let mut timestamp = self.time.current_millis();

        match state.last_timestamp {
            Some(last) if timestamp < last => {
                return Err(Error::ClockMovedBackward {
                    backwards_ms: last - timestamp,
                });
            }
            Some(last) if timestamp == last => {
                state.sequence = (state.sequence + 1) & RimeId::SEQUENCE_MASK;
                if state.sequence == 0 {
                    timestamp = self.until_next_millis(last);
                }
            }
            _ => state.sequence = 0,
        }

        state.last_timestamp = Some(timestamp);
        Ok(RimeId::from_parts(
            timestamp,
            self.datacenter_id,
            self.worker_id,
            state.sequence,
        ))
    }

    /// Re-reads the clock until it advances strictly past `last`.
    ///
    /// Runs with the state lock held, stalling every caller of this instance
    /// until the next tick. Yields between reads rather than spinning hot.
    fn until_next_millis(&self, last: u64) -> u64 {
        let mut timestamp = self.time.current_millis();
        while timestamp <= last {
            thread::yield_now();
            timestamp = self.time.current_millis();
        }
        timestamp
    }
}
