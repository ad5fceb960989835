use serde::Serialize;

use crate::common_types::CpuInterval;
use crate::scheduler::{Pid, PolicyKind, Process};
use crate::schedulers::SimProcess;

/// CPU history of one completed process
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProcessLog {
    pub pid: Pid,
    /// Ready level the process ended at
    pub priority: usize,
    pub intervals: Vec<CpuInterval>,
}

impl ProcessLog {
    pub fn from_process(proc: &dyn Process) -> ProcessLog {
        ProcessLog {
            pid: proc.pid(),
            priority: proc.priority(),
            intervals: proc.cpu_intervals().to_vec(),
        }
    }

    /// Start and end ticks of every interval, alternating
    pub fn flat(&self) -> Vec<usize> {
        self.intervals
            .iter()
            .flat_map(|interval| [interval.start.get(), interval.end.get()])
            .collect()
    }

    /// Pairs of `(start, end)` ticks
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.intervals
            .iter()
            .map(|interval| (interval.start.get(), interval.end.get()))
            .collect()
    }

    pub fn cpu_time(&self) -> usize {
        self.intervals.iter().map(CpuInterval::len).sum()
    }
}

/// Result of a simulation run
#[derive(Clone, Debug, Serialize)]
pub struct SimulationReport {
    pub policy: PolicyKind,
    /// Completed processes, in completion order
    pub processes: Vec<ProcessLog>,
    /// Number of processes in the workload
    pub total: usize,
    pub ticks_elapsed: usize,
}

impl SimulationReport {
    pub fn new(
        policy: PolicyKind,
        completed: &[SimProcess],
        total: usize,
        ticks_elapsed: usize,
    ) -> SimulationReport {
        SimulationReport {
            policy,
            processes: completed
                .iter()
                .map(|proc| ProcessLog::from_process(proc))
                .collect(),
            total,
            ticks_elapsed,
        }
    }

    pub fn completed_count(&self) -> usize {
        self.processes.len()
    }

    /// True if the tick bound stopped the run before every process completed
    pub fn is_truncated(&self) -> bool {
        self.completed_count() < self.total
    }

    pub fn get(&self, pid: Pid) -> Option<&ProcessLog> {
        self.processes.iter().find(|log| log.pid == pid)
    }
}

/// Renders the per-process CPU log:
///
/// ```text
/// process 1
/// 0 2 6 7
/// ```
pub fn format_log(report: &SimulationReport) -> String {
    let mut out = String::new();

    for log in &report.processes {
        out.push_str(&format!("process {}\n", log.pid));
        for tick in log.flat() {
            out.push_str(&format!("{} ", tick));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common_types::Timestamp;
    use crate::process_control_block::ProcessControlBlock;
    use crate::service::Service;

    fn finished(pid: usize, intervals: &[(usize, usize)]) -> SimProcess {
        let mut proc = SimProcess::new(Pid::new(pid), Timestamp::new(0), vec![Service::cpu(1)]);
        for (start, end) in intervals {
            proc.record_cpu_interval(Timestamp::new(*start), Timestamp::new(*end));
        }
        proc
    }

    #[test]
    fn formats_processes_in_completion_order() {
        let completed = vec![finished(2, &[(0, 2), (6, 7)]), finished(1, &[(2, 4)])];
        let report = SimulationReport::new(PolicyKind::Fcfs, &completed, 2, 7);

        assert_eq!(format_log(&report), "process 2\n0 2 6 7 \nprocess 1\n2 4 \n");
        assert!(!report.is_truncated());
        assert_eq!(report.get(Pid::new(2)).map(ProcessLog::cpu_time), Some(3));
    }

    #[test]
    fn missing_processes_mean_truncation() {
        let report = SimulationReport::new(PolicyKind::RoundRobin, &[finished(1, &[(0, 1)])], 3, 1000);
        assert!(report.is_truncated());
        assert_eq!(report.completed_count(), 1);
    }
}
