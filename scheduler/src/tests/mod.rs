use std::num::NonZeroUsize;

use crate::{Pid, ProcessSpec, Service, SimulationReport, Workload};


fn quantum(ticks: usize) -> NonZeroUsize {
    NonZeroUsize::new(ticks).unwrap()
}

fn workload(specs: Vec<ProcessSpec>) -> Workload {
    Workload::new(specs).unwrap()
}

fn single(services: Vec<Service>) -> Workload {
    workload(vec![ProcessSpec::new(1, 0, services)])
}

/// `(start, end)` pairs logged for `pid`, empty if it did not complete
fn intervals(report: &SimulationReport, pid: usize) -> Vec<(usize, usize)> {
    report
        .get(Pid::new(pid))
        .map(|log| log.pairs())
        .unwrap_or_default()
}

fn completion_order(report: &SimulationReport) -> Vec<usize> {
    report.processes.iter().map(|log| log.pid.get()).collect()
}
