//! Lamport clock for stamping last-write-wins updates.
//!
//! A replica ticks its clock for every local write and folds in the
//! timestamps it observes from remote writes. Timestamps produced this way
//! are strictly increasing per replica and larger than anything the replica
//! has seen, so a write stamped after observing another write always wins
//! against it in the LWW document. Concurrent writes can share a timestamp;
//! the LWW order breaks those ties by value.
//!
//! Complexity:
//! - tick: O(1)
//! - observe: O(1)
//! - merge: O(1)

use std::cmp::Ordering;

use crate::document::lww::Timestamped;

/// A Lamport clock.
///
/// The clock is a simple counter that:
/// - Increments on local writes (tick, stamp)
/// - Moves to max(local, remote) on observing a remote timestamp
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LamportClock {
    time: u64,
}

impl LamportClock {
    /// Create a new clock starting at 0.
    pub fn new() -> LamportClock {
        return LamportClock { time: 0 };
    }

    /// Create a clock with a specific starting time.
    pub fn with_time(time: u64) -> LamportClock {
        return LamportClock { time };
    }

    /// Get the current time.
    #[inline]
    pub fn time(&self) -> u64 {
        return self.time;
    }

    /// Increment the clock for a local write.
    /// Returns the new time.
    #[inline]
    pub fn tick(&mut self) -> u64 {
        self.time = self.time.saturating_add(1);
        return self.time;
    }

    /// Fold in a timestamp seen on a remote write.
    /// The next `tick` will be strictly greater than `remote_time`.
    #[inline]
    pub fn observe(&mut self, remote_time: u64) {
        self.time = self.time.max(remote_time);
    }

    /// Merge with another clock (for sync).
    /// Sets local time to max(local, other).
    #[inline]
    pub fn merge(&mut self, other: &LamportClock) {
        self.observe(other.time);
    }

    /// Tick and attach the new time to `value`.
    pub fn stamp<S>(&mut self, value: S) -> Timestamped<S> {
        let timestamp = self.tick();
        return Timestamped::new(timestamp, value);
    }
}

impl PartialOrd for LamportClock {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        return Some(self.cmp(other));
    }
}

impl Ord for LamportClock {
    fn cmp(&self, other: &Self) -> Ordering {
        return self.time.cmp(&other.time);
    }
}
