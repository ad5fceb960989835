use crate::scheduler::Process;

pub trait Collector {
    // Returns a list of processes that did not arrive yet
    fn collect_pending(&self) -> Vec<&dyn Process>;

    // Returns a list of ready processes, highest priority first
    fn collect_ready(&self) -> Vec<&dyn Process>;

    // Returns a list of processes blocked on a device
    fn collect_blocked(&self) -> Vec<&dyn Process>;

    // Returns a list of processes waiting for the mutex
    fn collect_waiting(&self) -> Vec<&dyn Process>;

    // Returns a list of completed processes
    fn collect_completed(&self) -> Vec<&dyn Process>;
}

pub fn collect_all(scheduler: &dyn Collector) -> Vec<&dyn Process> {
    let mut procs: Vec<&dyn Process> = Vec::new();

    for item in scheduler.collect_pending() {
        procs.push(item);
    }

    for item in scheduler.collect_ready() {
        procs.push(item);
    }

    for item in scheduler.collect_blocked() {
        procs.push(item);
    }

    for item in scheduler.collect_waiting() {
        procs.push(item);
    }

    for item in scheduler.collect_completed() {
        procs.push(item);
    }

    procs
}
