//! Turn executors: run one player's turn from `Idle` back to `Idle`.
//!
//! The scheduler resolves an executor from the [`ExecutorRegistry`] by the
//! player's [`beam_core::ControllerKind`] and awaits it. Each executor walks
//! the shared phase through one turn and must leave it `Idle` on every
//! normal exit path; the scheduler's cancel path covers the rest.

mod computer;
mod context;
mod human;
mod registry;

pub use computer::ComputerExecutor;
pub use context::{PhaseCell, TurnContext};
pub(crate) use context::PhaseStatus;
pub use human::HumanExecutor;
pub use registry::ExecutorRegistry;

use async_trait::async_trait;
use beam_core::Space;

use crate::api::Result;

/// How a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Moved { from: Space, to: Space },
    /// The board refused the chosen destination.
    Rejected { to: Space },
    /// No move was attempted.
    Skipped,
}

impl TurnOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, TurnOutcome::Moved { .. })
    }
}

/// Runs a single turn against the borrowed [`TurnContext`].
#[async_trait]
pub trait TurnExecutor: Send + Sync {
    /// Human-readable name used in logs.
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: &mut TurnContext<'_>) -> Result<TurnOutcome>;
}
