use crate::common_types::{CpuInterval, Timestamp};
use crate::process_control_block::{Advance, ProcessControlBlock};
use crate::scheduler::{Pid, Process, ProcessState};
use crate::service::Service;

/// A process taking part in the simulation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimProcess {
    /// The pid of the process
    pid: Pid,
    /// The tick at which the process enters the ready system
    arrival_time: Timestamp,
    /// Requested services, in order; never changes after creation
    services: Vec<Service>,
    /// Index of the current service
    cursor: usize,
    /// Ticks already spent on the current service
    service_ticks: usize,
    /// Every stretch of CPU occupancy, in the order they happened
    cpu_intervals: Vec<CpuInterval>,
    /// Ready level, 0 is the highest
    ///
    /// Only the feedback policy ever changes it
    priority: usize,
    state: ProcessState,
    /// Set once an unlock found the mutex not held by this process
    stalled: bool,
}

impl SimProcess {
    /// Creates a process that has not arrived yet
    ///
    /// * `pid` - identity of the process
    /// * `arrival_time` - tick of admission into the ready system
    /// * `services` - the ordered service requests
    pub fn new(pid: Pid, arrival_time: Timestamp, services: Vec<Service>) -> SimProcess {
        SimProcess {
            pid,
            arrival_time,
            services,
            cursor: 0,
            service_ticks: 0,
            cpu_intervals: Vec::new(),
            priority: 0,
            state: ProcessState::Pending,
            stalled: false,
        }
    }
}

impl Process for SimProcess {
    fn pid(&self) -> Pid {
        self.pid
    }

    fn state(&self) -> ProcessState {
        self.state
    }

    fn priority(&self) -> usize {
        self.priority
    }

    fn arrival_time(&self) -> Timestamp {
        self.arrival_time
    }

    fn services(&self) -> &[Service] {
        &self.services
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn cpu_intervals(&self) -> &[CpuInterval] {
        &self.cpu_intervals
    }
}

impl ProcessControlBlock for SimProcess {
    fn current_service(&self) -> Option<Service> {
        self.services.get(self.cursor).copied()
    }

    fn advance_to_next_service(&mut self) -> Advance {
        if self.cursor < self.services.len() {
            self.cursor += 1;
        }
        self.service_ticks = 0;

        if self.cursor >= self.services.len() {
            Advance::Completed
        } else {
            Advance::HasNextService
        }
    }

    fn ticks_on_current_service(&self) -> usize {
        self.service_ticks
    }

    fn tick_current_service(&mut self) -> usize {
        self.service_ticks += 1;
        self.service_ticks
    }

    fn record_cpu_interval(&mut self, start: Timestamp, end: Timestamp) {
        self.cpu_intervals.push(CpuInterval::new(start, end));
    }

    fn set_state(&mut self, state: ProcessState) {
        self.state = state;
    }

    fn set_priority(&mut self, priority: usize) {
        self.priority = priority;
    }

    fn is_stalled(&self) -> bool {
        self.stalled
    }

    fn mark_stalled(&mut self) {
        self.stalled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(services: Vec<Service>) -> SimProcess {
        SimProcess::new(Pid::new(1), Timestamp::new(0), services)
    }

    #[test]
    fn advancing_walks_the_service_sequence() {
        let mut proc = process(vec![Service::cpu(2), Service::disk(3)]);
        assert_eq!(proc.current_service(), Some(Service::cpu(2)));

        proc.tick_current_service();
        proc.tick_current_service();
        assert_eq!(proc.ticks_on_current_service(), 2);

        assert_eq!(proc.advance_to_next_service(), Advance::HasNextService);
        assert_eq!(proc.current_service(), Some(Service::disk(3)));
        assert_eq!(proc.ticks_on_current_service(), 0);

        assert_eq!(proc.advance_to_next_service(), Advance::Completed);
        assert_eq!(proc.current_service(), None);
        assert!(proc.is_finished());
    }

    #[test]
    fn cursor_never_runs_past_the_end() {
        let mut proc = process(vec![Service::cpu(1)]);
        proc.advance_to_next_service();
        assert_eq!(proc.advance_to_next_service(), Advance::Completed);
        assert_eq!(proc.cursor(), 1);
        assert_eq!(proc.remaining_services(), 0);
    }

    #[test]
    fn intervals_are_kept_separate() {
        let mut proc = process(vec![Service::cpu(10)]);
        proc.record_cpu_interval(Timestamp::new(0), Timestamp::new(5));
        proc.record_cpu_interval(Timestamp::new(5), Timestamp::new(10));

        assert_eq!(
            proc.cpu_intervals(),
            &[
                CpuInterval::new(Timestamp::new(0), Timestamp::new(5)),
                CpuInterval::new(Timestamp::new(5), Timestamp::new(10)),
            ]
        );
    }
}
