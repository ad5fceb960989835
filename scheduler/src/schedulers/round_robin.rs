use std::num::NonZeroUsize;

use crate::scheduler::{PolicyKind, Scheduler};

/// Round robin over a single ready queue.
///
/// A process that held the CPU for `quanta` ticks goes back to the tail.
#[derive(Clone, Copy, Debug)]
pub struct RoundRobinScheduler {
    quanta: NonZeroUsize,
}

impl RoundRobinScheduler {
    /// * `timeslice` - the time quanta that a process can run before it is preempted
    pub fn new(timeslice: NonZeroUsize) -> RoundRobinScheduler {
        RoundRobinScheduler { quanta: timeslice }
    }
}

impl Scheduler for RoundRobinScheduler {
    fn kind(&self) -> PolicyKind {
        PolicyKind::RoundRobin
    }

    fn quantum(&self) -> Option<NonZeroUsize> {
        Some(self.quanta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requeues_at_the_same_level() {
        let policy = RoundRobinScheduler::new(NonZeroUsize::new(5).unwrap());
        assert_eq!(policy.levels(), 1);
        assert_eq!(policy.quantum().map(NonZeroUsize::get), Some(5));
        assert_eq!(policy.expire(0), 0);
    }
}
