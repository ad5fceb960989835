use crate::common_types::Timestamp;
use crate::schedulers::SimProcess;
use crate::service::Device;

/// Queue transfer primitives shared by every policy
pub trait ProcessManager {
    /// Moves every pending process arriving at `now` to the tail of the
    /// ready system and returns how many were admitted
    ///
    /// * `now` - the current tick
    fn admit_arrivals(&mut self, now: Timestamp) -> usize;

    /// Enqueues the given process to the tail of the ready queue matching
    /// its priority
    ///
    /// * `proc` - process to be enqueued
    fn enqueue_ready(&mut self, proc: SimProcess);

    /// Parks the process on a device queue until the device served it
    ///
    /// * `proc` - process to be blocked
    /// * `device` - the device it waits for
    fn block_on_device(&mut self, proc: SimProcess, device: Device);

    /// Parks the process until the mutex becomes free
    ///
    /// * `proc` - process to be blocked
    fn block_on_mutex(&mut self, proc: SimProcess);

    /// Moves a process that satisfied all of its services to the
    /// completed container
    ///
    /// * `proc` - the finished process
    fn complete(&mut self, proc: SimProcess);
}
