//! The tick loop shared by every policy.
//!
//! Each tick runs, in order: admission, keyboard then disk service, mutex
//! hand-off, CPU dispatch and the termination check. Only the dispatch step
//! asks the policy anything.

use log::{debug, info, trace, warn};

use crate::common_funcs::{expire_quantum, finish_cpu_service, settle_head, Settled};
use crate::common_types::Timestamp;
use crate::config::SimConfig;
use crate::mutex::MutexResource;
use crate::process_control_block::{Advance, ProcessControlBlock};
use crate::process_manager::ProcessManager;
use crate::report::SimulationReport;
use crate::scheduler::{Pid, Process, ProcessState, Scheduler};
use crate::schedulers::QueueSet;
use crate::service::Device;
use crate::workload::Workload;

/// The process holding the CPU and the tick it got it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Dispatch {
    pid: Pid,
    since: Timestamp,
}

pub struct TickEngine<S: Scheduler> {
    policy: S,
    config: SimConfig,
    queues: QueueSet,
    mutex: MutexResource,
    /// The next tick to simulate
    clock: Timestamp,
    running: Option<Dispatch>,
    total: usize,
}

impl<S: Scheduler> TickEngine<S> {
    /// Creates an engine with every process of `workload` pending
    ///
    /// * `policy` - the dispatch policy
    /// * `workload` - processes in input order
    /// * `config` - tick bound and device latency are read from it
    pub fn new(policy: S, workload: Workload, config: SimConfig) -> TickEngine<S> {
        let processes = workload.into_processes();
        let total = processes.len();
        let queues = QueueSet::new(processes, policy.levels());

        TickEngine {
            policy,
            config,
            queues,
            mutex: MutexResource::new(),
            clock: Timestamp::new(0),
            running: None,
            total,
        }
    }

    pub fn queues(&self) -> &QueueSet {
        &self.queues
    }

    pub fn mutex(&self) -> &MutexResource {
        &self.mutex
    }

    /// The next tick to be simulated, also the number of ticks done so far
    pub fn now(&self) -> Timestamp {
        self.clock
    }

    /// Pid of the process currently holding the CPU
    pub fn running(&self) -> Option<Pid> {
        self.running.map(|dispatch| dispatch.pid)
    }

    pub fn all_completed(&self) -> bool {
        self.queues.completed().len() == self.total
    }

    pub fn is_finished(&self) -> bool {
        self.all_completed() || self.clock.get() >= self.config.max_ticks
    }

    /// Simulates one tick, returns false once the run is over
    pub fn step(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        let now = self.clock;
        trace!("t={} tick", now);

        self.queues.admit_arrivals(now);
        for device in Device::ALL {
            self.serve_device(device, now);
        }
        self.serve_mutex(now);
        self.dispatch(now);

        self.clock = now + 1;
        !self.is_finished()
    }

    /// Runs until every process completed or the tick bound is hit
    pub fn run(mut self) -> SimulationReport {
        while self.step() {}

        let report = self.into_report();
        if report.is_truncated() {
            info!(
                "{}: stopped after {} ticks with {}/{} processes completed",
                report.policy,
                report.ticks_elapsed,
                report.completed_count(),
                report.total
            );
        } else {
            info!(
                "{}: {} processes completed in {} ticks",
                report.policy, report.total, report.ticks_elapsed
            );
        }

        report
    }

    pub fn into_report(self) -> SimulationReport {
        SimulationReport::new(
            self.policy.kind(),
            self.queues.completed(),
            self.total,
            self.clock.get(),
        )
    }

    /// Serves the head of a device queue for one tick.
    ///
    /// The head is released once it has been on the device for its service
    /// time plus the release latency.
    fn serve_device(&mut self, device: Device, now: Timestamp) {
        let latency = self.config.device_latency;
        let queue = self.queues.device_queue_mut(device);

        let Some(head) = queue.front_mut() else {
            return;
        };
        let duration = head.current_service().map_or(0, |service| service.duration());
        if head.ticks_on_current_service() < duration + latency {
            head.tick_current_service();
            return;
        }

        let Some(mut proc) = queue.pop_front() else {
            return;
        };
        debug!("t={} {} released pid {}", now, device, proc.pid());
        match proc.advance_to_next_service() {
            Advance::Completed => self.queues.complete(proc),
            Advance::HasNextService => self.queues.enqueue_ready(proc),
        }
    }

    /// Hands the mutex to the first waiter if nobody holds it
    fn serve_mutex(&mut self, now: Timestamp) {
        if self.mutex.is_locked() {
            return;
        }

        let Some(mut proc) = self.queues.mutex_queue_mut().pop_front() else {
            return;
        };
        self.mutex.lock(proc.pid());
        debug!("t={} pid {} acquired the mutex", now, proc.pid());

        match proc.advance_to_next_service() {
            Advance::Completed => {
                warn!("pid {} completed while holding the mutex", proc.pid());
                self.queues.complete(proc);
            }
            Advance::HasNextService => self.queues.enqueue_ready(proc),
        }
    }

    /// Gives the CPU to the head of the level the policy picks.
    ///
    /// A head that blocks or completes before spending any CPU time is
    /// replaced by the next one within the same tick.
    fn dispatch(&mut self, now: Timestamp) {
        loop {
            let Some(level) = self.policy.select(self.queues.ready()) else {
                self.running = None;
                return;
            };
            let Some(pid) = self.queues.ready().head(level).map(|head| head.pid()) else {
                self.running = None;
                return;
            };
            let since = match self.running {
                Some(current) if current.pid == pid => current.since,
                _ => now,
            };

            let mut settled = settle_head(&mut self.queues, &mut self.mutex, level, since, now);
            if settled == Settled::Departed {
                if self.running() == Some(pid) {
                    self.running = None;
                }
                continue;
            }

            self.take_cpu(pid, since, now);
            if settled == Settled::Running {
                settled = self.run_head(level, since, now);
            }

            match settled {
                Settled::Departed => self.running = None,
                Settled::Running | Settled::Stalled => self.check_quantum(level, since, now),
            }
            return;
        }
    }

    /// Marks `pid` as the process on the CPU since `since`.
    ///
    /// A process pushed aside by a higher level keeps its place in the
    /// ready system; the stretch it ran is logged here.
    fn take_cpu(&mut self, pid: Pid, since: Timestamp, now: Timestamp) {
        if let Some(previous) = self.running {
            if previous.pid == pid {
                return;
            }

            if let Some(proc) = self.queues.ready_mut().find_mut(previous.pid) {
                if previous.since < now && !proc.is_stalled() {
                    debug!("t={} pid {} preempted by pid {}", now, previous.pid, pid);
                    proc.record_cpu_interval(previous.since, now);
                }
                proc.set_state(ProcessState::Ready);
            }
        }

        trace!("t={} dispatch pid {}", now, pid);
        if let Some(proc) = self.queues.ready_mut().find_mut(pid) {
            proc.set_state(ProcessState::Running);
        }
        self.running = Some(Dispatch { pid, since });
    }

    /// Spends this tick on the CPU burst of the head of `level`
    fn run_head(&mut self, level: usize, since: Timestamp, now: Timestamp) -> Settled {
        let Some(head) = self.queues.ready_mut().head_mut(level) else {
            return Settled::Departed;
        };

        let duration = head.current_service().map_or(0, |service| service.duration());
        let ticks = head.tick_current_service();
        trace!("t={} pid {} on cpu {}/{}", now, head.pid(), ticks, duration);
        if ticks < duration {
            return Settled::Running;
        }

        finish_cpu_service(&mut self.queues, &mut self.mutex, level, since, now)
    }

    /// Requeues the head of `level` if it held the CPU for a whole quantum
    fn check_quantum(&mut self, level: usize, since: Timestamp, now: Timestamp) {
        let Some(quantum) = self.policy.quantum() else {
            return;
        };
        if (now + 1).since(since) < quantum.get() {
            return;
        }

        let next_level = self.policy.expire(level);
        expire_quantum(&mut self.queues, level, since, now, next_level);
        self.running = None;
    }
}
