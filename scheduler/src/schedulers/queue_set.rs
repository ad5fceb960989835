use std::collections::VecDeque;

use log::debug;

use crate::collector::Collector;
use crate::common_types::Timestamp;
use crate::process_control_block::ProcessControlBlock;
use crate::process_manager::ProcessManager;
use crate::scheduler::{Pid, Process, ProcessState};
use crate::schedulers::SimProcess;
use crate::service::Device;

/// The ready system: one FIFO per priority level, level 0 first
#[derive(Clone, Debug)]
pub struct ReadyQueues {
    levels: Vec<VecDeque<SimProcess>>,
}

impl ReadyQueues {
    /// Creates `levels` empty queues, at least one
    pub fn new(levels: usize) -> ReadyQueues {
        ReadyQueues {
            levels: vec![VecDeque::new(); levels.max(1)],
        }
    }

    /// Appends the process to the queue of its own priority, clamped to
    /// the lowest level
    pub fn push_back(&mut self, mut proc: SimProcess) {
        let level = proc.priority().min(self.levels.len() - 1);
        proc.set_priority(level);
        proc.set_state(ProcessState::Ready);
        self.levels[level].push_back(proc);
    }

    /// The highest priority level holding at least one process
    pub fn first_non_empty(&self) -> Option<usize> {
        self.levels.iter().position(|queue| !queue.is_empty())
    }

    pub fn head(&self, level: usize) -> Option<&SimProcess> {
        self.levels.get(level).and_then(|queue| queue.front())
    }

    pub fn head_mut(&mut self, level: usize) -> Option<&mut SimProcess> {
        self.levels.get_mut(level).and_then(|queue| queue.front_mut())
    }

    pub fn pop_front(&mut self, level: usize) -> Option<SimProcess> {
        self.levels.get_mut(level).and_then(|queue| queue.pop_front())
    }

    pub fn find_mut(&mut self, pid: Pid) -> Option<&mut SimProcess> {
        self.levels
            .iter_mut()
            .flat_map(|queue| queue.iter_mut())
            .find(|proc| proc.pid() == pid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimProcess> {
        self.levels.iter().flat_map(|queue| queue.iter())
    }

    pub fn len(&self) -> usize {
        self.levels.iter().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(VecDeque::is_empty)
    }
}

/// Every container a process can live in
#[derive(Clone, Debug)]
pub struct QueueSet {
    /// Processes whose arrival tick has not come yet, in workload order
    pending: Vec<SimProcess>,
    ready: ReadyQueues,
    keyboard: VecDeque<SimProcess>,
    disk: VecDeque<SimProcess>,
    /// Processes waiting to lock the mutex
    mutex: VecDeque<SimProcess>,
    /// Finished processes, in completion order
    completed: Vec<SimProcess>,
}

impl QueueSet {
    /// Creates the containers with every process pending
    ///
    /// * `processes` - the workload, in input order
    /// * `levels` - number of ready queues
    pub fn new(processes: Vec<SimProcess>, levels: usize) -> QueueSet {
        QueueSet {
            pending: processes,
            ready: ReadyQueues::new(levels),
            keyboard: VecDeque::new(),
            disk: VecDeque::new(),
            mutex: VecDeque::new(),
            completed: Vec::new(),
        }
    }

    pub fn pending(&self) -> &[SimProcess] {
        &self.pending
    }

    pub fn ready(&self) -> &ReadyQueues {
        &self.ready
    }

    pub fn ready_mut(&mut self) -> &mut ReadyQueues {
        &mut self.ready
    }

    pub fn device_queue(&self, device: Device) -> &VecDeque<SimProcess> {
        match device {
            Device::Keyboard => &self.keyboard,
            Device::Disk => &self.disk,
        }
    }

    pub fn device_queue_mut(&mut self, device: Device) -> &mut VecDeque<SimProcess> {
        match device {
            Device::Keyboard => &mut self.keyboard,
            Device::Disk => &mut self.disk,
        }
    }

    pub fn mutex_queue(&self) -> &VecDeque<SimProcess> {
        &self.mutex
    }

    pub fn mutex_queue_mut(&mut self) -> &mut VecDeque<SimProcess> {
        &mut self.mutex
    }

    pub fn completed(&self) -> &[SimProcess] {
        &self.completed
    }

    /// Number of processes across all containers
    pub fn len(&self) -> usize {
        self.pending.len()
            + self.ready.len()
            + self.keyboard.len()
            + self.disk.len()
            + self.mutex.len()
            + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProcessManager for QueueSet {
    fn admit_arrivals(&mut self, now: Timestamp) -> usize {
        if self.pending.iter().all(|proc| proc.arrival_time() != now) {
            return 0;
        }

        let (arriving, waiting): (Vec<SimProcess>, Vec<SimProcess>) = self
            .pending
            .drain(..)
            .partition(|proc| proc.arrival_time() == now);
        self.pending = waiting;

        let admitted = arriving.len();
        for mut proc in arriving {
            debug!("t={} admit pid {}", now, proc.pid());
            proc.set_priority(0);
            self.ready.push_back(proc);
        }

        admitted
    }

    fn enqueue_ready(&mut self, proc: SimProcess) {
        debug!("pid {} ready at level {}", proc.pid(), proc.priority());
        self.ready.push_back(proc);
    }

    fn block_on_device(&mut self, mut proc: SimProcess, device: Device) {
        debug!("pid {} blocked on {}", proc.pid(), device);
        proc.set_state(ProcessState::Blocked { device });
        self.device_queue_mut(device).push_back(proc);
    }

    fn block_on_mutex(&mut self, mut proc: SimProcess) {
        debug!("pid {} waiting for the mutex", proc.pid());
        proc.set_state(ProcessState::WaitingMutex);
        self.mutex.push_back(proc);
    }

    fn complete(&mut self, mut proc: SimProcess) {
        debug!("pid {} completed", proc.pid());
        proc.set_state(ProcessState::Completed);
        self.completed.push(proc);
    }
}

impl Collector for QueueSet {
    fn collect_pending(&self) -> Vec<&dyn Process> {
        self.pending.iter().map(|proc| proc as &dyn Process).collect()
    }

    fn collect_ready(&self) -> Vec<&dyn Process> {
        self.ready.iter().map(|proc| proc as &dyn Process).collect()
    }

    fn collect_blocked(&self) -> Vec<&dyn Process> {
        let mut procs: Vec<&dyn Process> = Vec::new();

        for device in Device::ALL {
            for item in self.device_queue(device).iter() {
                procs.push(item);
            }
        }

        procs
    }

    fn collect_waiting(&self) -> Vec<&dyn Process> {
        self.mutex.iter().map(|proc| proc as &dyn Process).collect()
    }

    fn collect_completed(&self) -> Vec<&dyn Process> {
        self.completed.iter().map(|proc| proc as &dyn Process).collect()
    }
}
