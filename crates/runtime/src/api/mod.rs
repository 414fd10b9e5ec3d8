//! Public runtime API surface.
//!
//! This module gathers the types exposed to hosts of the runtime crate so the
//! scheduler and executors can stay focused on running turns.

pub mod errors;
pub mod handle;
pub mod session;

pub use errors::{Result, RuntimeError};
pub use handle::GameHandle;
pub use session::{GameOutcome, SessionReport};
