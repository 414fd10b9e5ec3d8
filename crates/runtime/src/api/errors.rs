//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the scheduler task, the phase machine and the board so
//! hosts can bubble them up with consistent context.
use thiserror::Error;

use beam_core::{ControllerKind, PhaseError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires a board to be configured before building")]
    MissingBoard,

    #[error("a game is already running")]
    GameAlreadyRunning,

    #[error("no game is running")]
    NoGameRunning,

    #[error("{kind} turn executor not registered")]
    ExecutorNotSet { kind: ControllerKind },

    #[error(transparent)]
    Phase(#[from] PhaseError),

    #[error("scheduler worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("selection channel closed")]
    SelectionChannelClosed,

    #[error("phase channel closed")]
    PhaseChannelClosed,
}
