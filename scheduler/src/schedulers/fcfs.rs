use std::num::NonZeroUsize;

use crate::scheduler::{PolicyKind, Scheduler};

/// First come, first served.
///
/// The head of the single ready queue keeps the CPU until its burst ends.
#[derive(Clone, Copy, Debug, Default)]
pub struct FcfsScheduler;

impl FcfsScheduler {
    pub fn new() -> FcfsScheduler {
        FcfsScheduler
    }
}

impl Scheduler for FcfsScheduler {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Fcfs
    }

    fn quantum(&self) -> Option<NonZeroUsize> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_preempts() {
        let policy = FcfsScheduler::new();
        assert_eq!(policy.levels(), 1);
        assert_eq!(policy.quantum(), None);
        assert_eq!(policy.expire(0), 0);
    }
}
