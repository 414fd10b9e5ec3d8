//! Worker tasks that back the runtime orchestration.
//!
//! One scheduler worker runs per game instance and owns the board until the
//! game stops.

mod scheduler;

pub use scheduler::{SchedulerWorker, WorkerExit};
