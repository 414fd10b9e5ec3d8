//! Turn scheduling runtime for the beam board game.
//!
//! This crate drives a [`beam_core::Board`] through rounds of turns. The host
//! embeds [`Runtime`] to enter and exit games, and hands [`GameHandle`] clones
//! to whatever reports human selections or renders events.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the host-facing handle, errors and session report
//! - `runtime` holds [`Runtime`], its builder and [`RuntimeConfig`]
//! - [`executors`] runs one player's turn, one executor per controller kind
//! - [`policy`] holds the pluggable computer turn policies
//! - [`clock`] abstracts the artificial computer delay
//! - [`events`] provides the topic-based event bus
//! - `workers` keeps the scheduler task internal to the crate
pub mod api;
pub mod clock;
pub mod events;
pub mod executors;
pub mod policy;

mod runtime;
mod workers;

pub use api::{GameHandle, GameOutcome, Result, RuntimeError, SessionReport};
pub use clock::{Clock, InstantClock, TokioClock};
pub use events::{Event, EventBus, GameEvent, PhaseEvent, Topic, TurnEvent};
pub use executors::{
    ComputerExecutor, ExecutorRegistry, HumanExecutor, TurnContext, TurnExecutor, TurnOutcome,
};
pub use policy::{FirstCandidatePolicy, RandomPolicy, TurnPolicy};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
