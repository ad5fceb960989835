use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Hard bound on the number of simulated ticks
pub const MAX_TICKS: usize = 1000;
/// Consecutive CPU ticks a process may hold under round robin and feedback
pub const QUANTUM: usize = 5;
/// Number of ready queues used by the feedback policy
pub const FEEDBACK_LEVELS: usize = 3;
/// Extra ticks a device keeps a process after its service time elapsed
pub const DEVICE_RELEASE_LATENCY: usize = 1;

/// A point on the simulation clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(usize);

impl Timestamp {
    /// Creates a new Timestamp object
    ///
    /// * `time` - inital value of the Timestamp
    pub fn new(time: usize) -> Timestamp {
        Timestamp(time)
    }

    pub fn get(&self) -> usize {
        self.0
    }

    /// Ticks elapsed since `earlier`, zero if `earlier` is in the future
    pub fn since(&self, earlier: Timestamp) -> usize {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<usize> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: usize) -> Self::Output {
        Timestamp::new(self.0 + rhs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One contiguous stretch of CPU occupancy, `[start, end)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CpuInterval {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl CpuInterval {
    pub fn new(start: Timestamp, end: Timestamp) -> CpuInterval {
        debug_assert!(start <= end);
        CpuInterval { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.since(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
