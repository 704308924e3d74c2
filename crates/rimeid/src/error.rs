//! Error types for ID generation.
//!
//! This module defines the central [`Error`] enum covering every failure the
//! generator can report.
//!
//! ## Error Cases
//! - `InvalidWorkerId` / `InvalidDatacenterId`: a construction-time identity
//!   fell outside its bit-width range. Configuration errors, fatal to that
//!   instance; fix the configuration rather than retrying.
//! - `ClockMovedBackward`: the wall clock was observed earlier than the last
//!   issued timestamp. Reported with the observed delta so the caller can
//!   decide whether to retry, wait out the discrepancy, or abort.
//!
//! Sequence exhaustion within a millisecond is deliberately absent: it is
//! absorbed by a blocking wait for the next tick, not surfaced as an error.

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for ID generation.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The configured worker ID exceeds the 5-bit field.
    #[error("worker id {id} exceeds maximum of {max}")]
    InvalidWorkerId { id: u64, max: u64 },

    /// The configured datacenter ID exceeds the 5-bit field.
    #[error("datacenter id {id} exceeds maximum of {max}")]
    InvalidDatacenterId { id: u64, max: u64 },

    /// The wall clock is behind the last issued timestamp.
    ///
    /// Generation is refused rather than stalled: an unbounded backward jump
    /// would otherwise block callers indefinitely and mask a systemic clock
    /// problem.
    #[error("clock moved backwards, refusing to generate ids for {backwards_ms}ms")]
    ClockMovedBackward { backwards_ms: u64 },
}
