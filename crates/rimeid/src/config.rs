use core::time::Duration;

use crate::DEFAULT_EPOCH;

/// Static identity and epoch configuration for an [`IdWorker`].
///
/// The host process decides where these values come from (flags, environment,
/// a config file); this type is only the hand-off point. Range validation
/// happens in the worker constructor, so a config can hold any value until it
/// is actually used.
///
/// Uniqueness across a fleet depends on every running worker having a
/// distinct `(worker_id, datacenter_id)` pair. That assignment is an
/// operational precondition this crate cannot verify.
///
/// [`IdWorker`]: crate::IdWorker
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Identity of this worker within its datacenter, `0..=31`.
    pub worker_id: u64,

    /// Identity of the datacenter this worker runs in, `0..=31`.
    pub datacenter_id: u64,

    /// Reference instant in whole seconds since the Unix epoch. All
    /// timestamps embedded in generated IDs are measured from here.
    pub epoch_secs: u64,
}

impl WorkerConfig {
    /// The configured epoch as a [`Duration`] since 1970-01-01 UTC.
    pub const fn epoch(&self) -> Duration {
        Duration::from_secs(self.epoch_secs)
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            worker_id: 0,
            datacenter_id: 0,
            epoch_secs: DEFAULT_EPOCH.as_secs(),
        }
    }
}
