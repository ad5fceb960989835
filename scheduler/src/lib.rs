//! A scheduling simulator library.
//!
//! This library runs a workload of simulated processes through a discrete
//! tick loop under one of three dispatch policies: first come first served,
//! round robin and multilevel feedback. Processes ask for CPU bursts,
//! keyboard and disk I/O, and lock or unlock a single shared mutex.
//!

use std::num::NonZeroUsize;

mod schedulers;
pub use schedulers::{
    FcfsScheduler, FeedbackScheduler, QueueSet, ReadyQueues, RoundRobinScheduler, SimProcess,
};

mod scheduler;
pub use crate::scheduler::{Pid, PolicyKind, Process, ProcessState, Scheduler};

mod common_types;
pub use crate::common_types::{
    CpuInterval, Timestamp, DEVICE_RELEASE_LATENCY, FEEDBACK_LEVELS, MAX_TICKS, QUANTUM,
};

mod service;
pub use crate::service::{Device, Service, ServiceKind};

mod collector;
pub use crate::collector::collect_all;
pub use crate::collector::Collector;

mod process_control_block;
pub use process_control_block::{Advance, ProcessControlBlock};

mod process_manager;
pub use crate::process_manager::ProcessManager;

mod mutex;
pub use crate::mutex::MutexResource;

mod common_funcs;
pub use common_funcs::{expire_quantum, finish_cpu_service, settle_head, Settled};

mod engine;
pub use crate::engine::TickEngine;

mod config;
pub use crate::config::SimConfig;

mod error;
pub use crate::error::{ConfigError, WorkloadError};

mod workload;
pub use crate::workload::{ProcessSpec, Workload};

mod report;
pub use crate::report::{format_log, ProcessLog, SimulationReport};

#[cfg(test)]
mod tests;

/// Runs `workload` first come, first served
pub fn fcfs(workload: Workload) -> SimulationReport {
    TickEngine::new(FcfsScheduler::new(), workload, SimConfig::default()).run()
}

/// Runs `workload` round robin
///
/// * `timeslice` - the time quanta that a process can run before it is preempted
pub fn round_robin(workload: Workload, timeslice: NonZeroUsize) -> SimulationReport {
    TickEngine::new(
        RoundRobinScheduler::new(timeslice),
        workload,
        SimConfig::default(),
    )
    .run()
}

/// Runs `workload` through three feedback levels
///
/// * `timeslice` - the time quanta that a process can run before it is
///                 preempted and demoted
pub fn feedback(workload: Workload, timeslice: NonZeroUsize) -> SimulationReport {
    TickEngine::new(
        FeedbackScheduler::new(timeslice),
        workload,
        SimConfig::default(),
    )
    .run()
}

/// Runs `workload` under the policy named by `kind`, taking the quantum,
/// feedback levels, tick bound and device latency from `config`
pub fn simulate(kind: PolicyKind, workload: Workload, config: &SimConfig) -> SimulationReport {
    match kind {
        PolicyKind::Fcfs => TickEngine::new(FcfsScheduler::new(), workload, config.clone()).run(),
        PolicyKind::RoundRobin => TickEngine::new(
            RoundRobinScheduler::new(config.quantum),
            workload,
            config.clone(),
        )
        .run(),
        PolicyKind::Feedback => TickEngine::new(
            FeedbackScheduler::with_levels(config.quantum, config.feedback_levels),
            workload,
            config.clone(),
        )
        .run(),
    }
}
