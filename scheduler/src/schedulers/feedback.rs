use std::num::NonZeroUsize;

use crate::common_types::FEEDBACK_LEVELS;
use crate::scheduler::{PolicyKind, Scheduler};
use crate::schedulers::ReadyQueues;

/// Multilevel feedback.
///
/// Arrivals enter level 0. Using up a quantum demotes a process one level,
/// down to the last one, where it keeps cycling. Blocking does not reset
/// the level.
#[derive(Clone, Copy, Debug)]
pub struct FeedbackScheduler {
    /// Time quanta of the scheduler
    ///
    /// The maximum time a process can run before being preempted
    quanta: NonZeroUsize,
    /// Number of ready queues, level 0 has the highest priority
    levels: usize,
}

impl FeedbackScheduler {
    /// * `timeslice` - the time quanta that a process can run before it is preempted
    pub fn new(timeslice: NonZeroUsize) -> FeedbackScheduler {
        FeedbackScheduler::with_levels(timeslice, FEEDBACK_LEVELS)
    }

    /// * `timeslice` - the time quanta that a process can run before it is preempted
    /// * `levels` - number of ready queues, at least one is always used
    pub fn with_levels(timeslice: NonZeroUsize, levels: usize) -> FeedbackScheduler {
        FeedbackScheduler {
            quanta: timeslice,
            levels: levels.max(1),
        }
    }

    pub fn lowest_level(&self) -> usize {
        self.levels - 1
    }
}

impl Scheduler for FeedbackScheduler {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Feedback
    }

    fn levels(&self) -> usize {
        self.levels
    }

    fn quantum(&self) -> Option<NonZeroUsize> {
        Some(self.quanta)
    }

    fn select(&self, ready: &ReadyQueues) -> Option<usize> {
        (0..self.levels).find(|level| ready.head(*level).is_some())
    }

    fn expire(&self, priority: usize) -> usize {
        (priority + 1).min(self.lowest_level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common_types::Timestamp;
    use crate::process_control_block::ProcessControlBlock;
    use crate::scheduler::Pid;
    use crate::schedulers::SimProcess;
    use crate::service::Service;

    fn policy() -> FeedbackScheduler {
        FeedbackScheduler::new(NonZeroUsize::new(5).unwrap())
    }

    #[test]
    fn demotes_down_to_the_floor() {
        let policy = policy();
        assert_eq!(policy.levels(), 3);
        assert_eq!(policy.expire(0), 1);
        assert_eq!(policy.expire(1), 2);
        assert_eq!(policy.expire(2), 2);
    }

    #[test]
    fn selects_highest_non_empty_level() {
        let mut ready = ReadyQueues::new(3);
        let mut low = SimProcess::new(Pid::new(1), Timestamp::new(0), vec![Service::cpu(1)]);
        low.set_priority(2);
        ready.push_back(low);
        assert_eq!(policy().select(&ready), Some(2));

        let mut mid = SimProcess::new(Pid::new(2), Timestamp::new(0), vec![Service::cpu(1)]);
        mid.set_priority(1);
        ready.push_back(mid);
        assert_eq!(policy().select(&ready), Some(1));
    }

    #[test]
    fn single_level_behaves_like_round_robin() {
        let policy = FeedbackScheduler::with_levels(NonZeroUsize::new(3).unwrap(), 0);
        assert_eq!(policy.levels(), 1);
        assert_eq!(policy.expire(0), 0);
    }
}
