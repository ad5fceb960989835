//! Dispatch policies and the containers they schedule from
//!
//! Each policy only decides which ready level to dispatch from and where a
//! process goes once its quantum is used up; the tick engine does the rest.

mod process_block;
pub use process_block::SimProcess;

mod queue_set;
pub use queue_set::{QueueSet, ReadyQueues};

mod fcfs;
pub use fcfs::FcfsScheduler;

mod round_robin;
pub use round_robin::RoundRobinScheduler;

mod feedback;
pub use feedback::FeedbackScheduler;
