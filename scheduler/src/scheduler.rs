use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common_types::{CpuInterval, Timestamp};
use crate::schedulers::ReadyQueues;
use crate::service::{Device, Service};

/// The identity of a simulated process
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(usize);

impl Pid {
    pub fn new(pid: usize) -> Pid {
        Pid(pid)
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a process currently stands.
///
/// Mirrors the container that holds the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ProcessState {
    /// Its arrival tick has not come yet
    Pending,
    Ready,
    Running,
    Blocked { device: Device },
    WaitingMutex,
    Completed,
}

/// Read-only view of a simulated process
pub trait Process {
    fn pid(&self) -> Pid;

    fn state(&self) -> ProcessState;

    /// Ready level the process belongs to, only moves under the feedback policy
    fn priority(&self) -> usize;

    fn arrival_time(&self) -> Timestamp;

    fn services(&self) -> &[Service];

    /// Index of the current service, equal to `services().len()` once done
    fn cursor(&self) -> usize;

    fn cpu_intervals(&self) -> &[CpuInterval];

    fn is_finished(&self) -> bool {
        self.cursor() >= self.services().len()
    }
}

/// A dispatch policy plugged into the tick engine
pub trait Scheduler {
    fn kind(&self) -> PolicyKind;

    /// Number of ready queues the policy dispatches from
    fn levels(&self) -> usize {
        1
    }

    /// Consecutive CPU ticks after which the running process is requeued,
    /// `None` if the policy never preempts
    fn quantum(&self) -> Option<NonZeroUsize>;

    /// Picks the ready level whose head gets the CPU
    fn select(&self, ready: &ReadyQueues) -> Option<usize> {
        ready.first_non_empty()
    }

    /// The level a process re-enters the ready system at after using up
    /// its quantum
    ///
    /// * `priority` - the level it was running at
    fn expire(&self, priority: usize) -> usize {
        priority
    }
}

/// The policies the simulator knows about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PolicyKind {
    Fcfs,
    RoundRobin,
    Feedback,
}

impl PolicyKind {
    /// Name used on the command line
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Fcfs => "FCFS",
            PolicyKind::RoundRobin => "RR",
            PolicyKind::Feedback => "FB",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FCFS" => Ok(PolicyKind::Fcfs),
            "RR" => Ok(PolicyKind::RoundRobin),
            "FB" => Ok(PolicyKind::Feedback),
            other => Err(format!(
                "unknown scheduling algorithm `{}`, has to be FCFS, RR or FB",
                other
            )),
        }
    }
}
