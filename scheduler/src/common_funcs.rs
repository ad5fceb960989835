//! Service transitions shared by every dispatch policy.
//!
//! All of them operate on the head of one ready level, the process the
//! engine dispatched this tick.

use log::{debug, warn};

use crate::common_types::Timestamp;
use crate::mutex::MutexResource;
use crate::process_control_block::ProcessControlBlock;
use crate::process_manager::ProcessManager;
use crate::scheduler::Process;
use crate::schedulers::{QueueSet, SimProcess};
use crate::service::ServiceKind;

/// Where the dispatched process stands once its services are settled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settled {
    /// The current service is a CPU burst, the process keeps the CPU
    Running,
    /// The process blocked or completed and left the ready system
    Departed,
    /// Unlock of a mutex the process does not hold; it stays put for good
    /// without progress
    Stalled,
}

/// Resolves the current service of the head of `level` until it lands on a
/// CPU burst, leaves the ready system or stalls.
///
/// Lock and unlock take no time, so they are chained within the same tick.
/// Every pass either returns or advances the cursor, which bounds the loop
/// by the number of remaining services.
///
/// * `dispatched` - tick the process got the CPU
/// * `end` - first tick it no longer holds the CPU if it leaves now
pub fn settle_head(
    queues: &mut QueueSet,
    mutex: &mut MutexResource,
    level: usize,
    dispatched: Timestamp,
    end: Timestamp,
) -> Settled {
    let budget = match queues.ready().head(level) {
        Some(head) => head.remaining_services() + 1,
        None => return Settled::Departed,
    };

    for _ in 0..budget {
        let Some(head) = queues.ready_mut().head_mut(level) else {
            return Settled::Departed;
        };
        let pid = head.pid();
        if head.is_stalled() {
            return Settled::Stalled;
        }

        let Some(service) = head.current_service() else {
            if mutex.holder() == Some(pid) {
                warn!("pid {} completed while holding the mutex", pid);
            }
            if let Some(proc) = leave_ready(queues, level, dispatched, end) {
                queues.complete(proc);
            }
            return Settled::Departed;
        };

        match service.kind() {
            ServiceKind::Cpu => return Settled::Running,
            ServiceKind::Keyboard | ServiceKind::Disk => {
                if let (Some(device), Some(proc)) = (
                    service.kind().device(),
                    leave_ready(queues, level, dispatched, end),
                ) {
                    queues.block_on_device(proc, device);
                }
                return Settled::Departed;
            }
            ServiceKind::MutexLock => {
                if mutex.lock(pid) {
                    debug!("pid {} locked the mutex", pid);
                    head.advance_to_next_service();
                } else {
                    if let Some(proc) = leave_ready(queues, level, dispatched, end) {
                        queues.block_on_mutex(proc);
                    }
                    return Settled::Departed;
                }
            }
            ServiceKind::MutexUnlock => {
                if mutex.unlock(pid) {
                    debug!("pid {} unlocked the mutex", pid);
                    head.advance_to_next_service();
                } else {
                    warn!(
                        "pid {} unlocks a mutex it does not hold ({:?}), stalled in place",
                        pid,
                        mutex.holder()
                    );
                    head.mark_stalled();
                    return Settled::Stalled;
                }
            }
        }
    }

    Settled::Stalled
}

/// Handles the end of the CPU burst of the head of `level` at tick `now`
pub fn finish_cpu_service(
    queues: &mut QueueSet,
    mutex: &mut MutexResource,
    level: usize,
    dispatched: Timestamp,
    now: Timestamp,
) -> Settled {
    match queues.ready_mut().head_mut(level) {
        Some(head) => {
            head.advance_to_next_service();
        }
        None => return Settled::Departed,
    }

    settle_head(queues, mutex, level, dispatched, now + 1)
}

/// Requeues the head of `level` after it used up its quantum at `now`
///
/// * `next_level` - the ready level it goes back to
pub fn expire_quantum(
    queues: &mut QueueSet,
    level: usize,
    dispatched: Timestamp,
    now: Timestamp,
    next_level: usize,
) {
    if let Some(mut proc) = queues.ready_mut().pop_front(level) {
        debug!(
            "t={} pid {} used its quantum, level {} -> {}",
            now,
            proc.pid(),
            level,
            next_level
        );
        if !proc.is_stalled() {
            proc.record_cpu_interval(dispatched, now + 1);
        }
        proc.set_priority(next_level);
        queues.enqueue_ready(proc);
    }
}

/// Pops the head of `level`, logging its CPU time if it had any
fn leave_ready(
    queues: &mut QueueSet,
    level: usize,
    dispatched: Timestamp,
    end: Timestamp,
) -> Option<SimProcess> {
    let mut proc = queues.ready_mut().pop_front(level)?;
    if dispatched < end {
        proc.record_cpu_interval(dispatched, end);
    }

    Some(proc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{Pid, ProcessState};
    use crate::service::{Device, Service};

    fn queues_with(services: Vec<Service>) -> QueueSet {
        let proc = SimProcess::new(Pid::new(1), Timestamp::new(0), services);
        let mut queues = QueueSet::new(vec![proc], 1);
        queues.admit_arrivals(Timestamp::new(0));
        queues
    }

    #[test]
    fn lock_and_unlock_chain_within_one_call() {
        let mut queues = queues_with(vec![
            Service::cpu(1),
            Service::lock(),
            Service::unlock(),
            Service::disk(2),
        ]);
        let mut mutex = MutexResource::new();

        let settled = finish_cpu_service(&mut queues, &mut mutex, 0, Timestamp::new(0), Timestamp::new(0));

        assert_eq!(settled, Settled::Departed);
        assert!(!mutex.is_locked());
        let blocked = queues.device_queue(Device::Disk).front().unwrap();
        assert_eq!(blocked.cursor(), 3);
        assert_eq!(blocked.cpu_intervals().len(), 1);
        assert_eq!(blocked.state(), ProcessState::Blocked { device: Device::Disk });
    }

    #[test]
    fn taken_mutex_parks_the_process() {
        let mut queues = queues_with(vec![Service::cpu(2), Service::lock(), Service::cpu(1)]);
        let mut mutex = MutexResource::new();
        mutex.lock(Pid::new(9));

        let settled = finish_cpu_service(&mut queues, &mut mutex, 0, Timestamp::new(3), Timestamp::new(4));

        assert_eq!(settled, Settled::Departed);
        let waiting = queues.mutex_queue().front().unwrap();
        assert_eq!(waiting.cpu_intervals()[0].start, Timestamp::new(3));
        assert_eq!(waiting.cpu_intervals()[0].end, Timestamp::new(5));
    }

    #[test]
    fn unlock_of_free_mutex_stalls_without_interval() {
        let mut queues = queues_with(vec![Service::cpu(1), Service::unlock(), Service::cpu(1)]);
        let mut mutex = MutexResource::new();

        let settled = finish_cpu_service(&mut queues, &mut mutex, 0, Timestamp::new(0), Timestamp::new(0));

        assert_eq!(settled, Settled::Stalled);
        let head = queues.ready().head(0).unwrap();
        assert_eq!(head.cursor(), 1);
        assert!(head.cpu_intervals().is_empty());
        assert!(head.is_stalled());
    }

    #[test]
    fn stalled_head_never_releases_a_lock_taken_later() {
        let mut queues = queues_with(vec![Service::unlock(), Service::cpu(1)]);
        let mut mutex = MutexResource::new();

        let settled = settle_head(&mut queues, &mut mutex, 0, Timestamp::new(0), Timestamp::new(0));
        assert_eq!(settled, Settled::Stalled);

        mutex.lock(Pid::new(7));
        let settled = settle_head(&mut queues, &mut mutex, 0, Timestamp::new(0), Timestamp::new(3));

        assert_eq!(settled, Settled::Stalled);
        assert_eq!(mutex.holder(), Some(Pid::new(7)));
        assert_eq!(queues.ready().head(0).map(|p| p.cursor()), Some(0));

        expire_quantum(&mut queues, 0, Timestamp::new(0), Timestamp::new(4), 0);
        assert!(queues.ready().head(0).unwrap().cpu_intervals().is_empty());
    }

    #[test]
    fn unlock_by_a_non_holder_stalls() {
        let mut queues = queues_with(vec![Service::unlock(), Service::cpu(1)]);
        let mut mutex = MutexResource::new();
        mutex.lock(Pid::new(7));

        let settled = settle_head(&mut queues, &mut mutex, 0, Timestamp::new(1), Timestamp::new(1));

        assert_eq!(settled, Settled::Stalled);
        assert_eq!(mutex.holder(), Some(Pid::new(7)));
    }

    #[test]
    fn settling_at_dispatch_records_no_empty_interval() {
        let mut queues = queues_with(vec![Service::keyboard(1), Service::cpu(1)]);
        let mut mutex = MutexResource::new();

        let settled = settle_head(&mut queues, &mut mutex, 0, Timestamp::new(2), Timestamp::new(2));

        assert_eq!(settled, Settled::Departed);
        assert!(queues.device_queue(Device::Keyboard).front().unwrap().cpu_intervals().is_empty());
    }

    #[test]
    fn expiry_moves_head_to_the_given_level() {
        let a = SimProcess::new(Pid::new(1), Timestamp::new(0), vec![Service::cpu(9)]);
        let b = SimProcess::new(Pid::new(2), Timestamp::new(0), vec![Service::cpu(9)]);
        let mut queues = QueueSet::new(vec![a, b], 3);
        queues.admit_arrivals(Timestamp::new(0));

        expire_quantum(&mut queues, 0, Timestamp::new(0), Timestamp::new(4), 1);

        assert_eq!(queues.ready().head(0).map(|p| p.pid()), Some(Pid::new(2)));
        let demoted = queues.ready().head(1).unwrap();
        assert_eq!(demoted.priority(), 1);
        assert_eq!(demoted.cpu_intervals()[0].end, Timestamp::new(5));
    }
}
