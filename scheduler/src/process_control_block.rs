use crate::common_types::Timestamp;
use crate::scheduler::{Process, ProcessState};
use crate::service::Service;

/// Outcome of moving a process past its current service
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Every requested service has been satisfied
    Completed,
    HasNextService,
}

/// The mutable side of a simulated process, driven by the tick engine
pub trait ProcessControlBlock: Process {
    /// The service the process is working on, `None` once it finished
    fn current_service(&self) -> Option<Service>;

    /// Moves the cursor forward and clears the tick counter
    fn advance_to_next_service(&mut self) -> Advance;

    fn ticks_on_current_service(&self) -> usize;

    /// Adds one tick to the current service and returns the new count
    fn tick_current_service(&mut self) -> usize;

    /// Appends `[start, end)` to the CPU log
    ///
    /// * `start` - tick the process was dispatched at
    /// * `end` - first tick it no longer held the CPU
    fn record_cpu_interval(&mut self, start: Timestamp, end: Timestamp);

    fn set_state(&mut self, state: ProcessState);

    fn set_priority(&mut self, priority: usize);

    /// True once the process got stuck on an unlock it could not perform.
    ///
    /// A stalled process keeps its place but never makes progress again.
    fn is_stalled(&self) -> bool;

    fn mark_stalled(&mut self);

    /// Services still ahead of the cursor, the current one included
    fn remaining_services(&self) -> usize {
        self.services().len().saturating_sub(self.cursor())
    }
}
