//! High-level runtime orchestrator.
//!
//! The runtime owns the board between games, spawns one scheduler worker per
//! game instance, and exposes a builder-based API for hosts to enter and exit
//! games.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;

use beam_core::{Board, Space};

use crate::api::{GameHandle, Result, RuntimeError, SessionReport};
use crate::clock::{Clock, TokioClock};
use crate::events::EventBus;
use crate::executors::{ExecutorRegistry, PhaseCell, PhaseStatus};
use crate::policy::{RandomPolicy, TurnPolicy};
use crate::workers::{SchedulerWorker, WorkerExit};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Artificial "thinking" delay before a computer move.
    pub cpu_turn_delay: Duration,
    pub selection_buffer_size: usize,
    pub event_buffer_size: usize,
    /// Ends the game with `GameOutcome::RoundLimit` after this many rounds.
    pub max_rounds: Option<u64>,
    /// Seeds the default random policy.
    pub rng_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            cpu_turn_delay: Duration::from_secs(1),
            selection_buffer_size: 16,
            event_buffer_size: 100,
            max_rounds: None,
            rng_seed: None,
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(millis) = read_env::<u64>("BEAM_CPU_TURN_DELAY_MS") {
            config.cpu_turn_delay = Duration::from_millis(millis);
        }

        if let Some(capacity) = read_env::<usize>("BEAM_SELECTION_BUFFER") {
            config.selection_buffer_size = capacity.max(1);
        }

        if let Some(capacity) = read_env::<usize>("BEAM_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        config.max_rounds = read_env::<u64>("BEAM_MAX_ROUNDS");
        config.rng_seed = read_env::<u64>("BEAM_RNG_SEED");

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

struct Session {
    exit_tx: watch::Sender<bool>,
    worker: JoinHandle<WorkerExit>,
}

/// Main runtime that hosts game instances.
///
/// [`GameHandle`] provides a cloneable façade for selection sources and
/// renderers; it survives across game instances.
pub struct Runtime {
    config: RuntimeConfig,
    handle: GameHandle,
    board: Option<Box<dyn Board>>,
    executors: ExecutorRegistry,
    clock: Arc<dyn Clock>,
    phase_tx: Arc<watch::Sender<PhaseStatus>>,
    selections: Arc<Mutex<mpsc::Receiver<Space>>>,
    session: Option<Session>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> GameHandle {
        self.handle.clone()
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// The board, while no game holds it.
    pub fn board(&self) -> Option<&dyn Board> {
        self.board.as_deref()
    }

    /// Resets the board and starts a fresh game instance.
    pub async fn enter_game(&mut self) -> Result<()> {
        if self.session.is_some() {
            return Err(RuntimeError::GameAlreadyRunning);
        }
        let mut board = self.board.take().ok_or(RuntimeError::MissingBoard)?;

        let players = board.reset();
        let phase = PhaseCell::new(Arc::clone(&self.phase_tx), self.handle.event_bus().clone());
        let selections = Arc::clone(&self.selections).lock_owned().await;
        let (exit_tx, exit_rx) = watch::channel(false);

        tracing::info!(
            target: "beam::runtime",
            players = players.len(),
            "Entering game"
        );

        let worker = SchedulerWorker::new(
            board,
            players,
            phase,
            selections,
            self.executors.clone(),
            Arc::clone(&self.clock),
            self.handle.event_bus().clone(),
            exit_rx,
            self.config.cpu_turn_delay,
            self.config.max_rounds,
        );

        let worker = tokio::spawn(worker.run());
        self.session = Some(Session { exit_tx, worker });
        Ok(())
    }

    /// Stops the running game, cancelling any turn in flight.
    ///
    /// Returns `None` when no game is running. A game that already ended on
    /// its own reports its natural outcome.
    pub async fn exit_game(&mut self) -> Result<Option<SessionReport>> {
        let Some(session) = self.session.take() else {
            tracing::debug!(target: "beam::runtime", "Exit requested with no game running");
            return Ok(None);
        };

        tracing::info!(target: "beam::runtime", "Exiting game");
        session.exit_tx.send_replace(true);
        self.join(session.worker).await.map(Some)
    }

    /// Awaits the running game's natural completion.
    pub async fn wait_for_game_over(&mut self) -> Result<SessionReport> {
        let session = self.session.take().ok_or(RuntimeError::NoGameRunning)?;
        self.join(session.worker).await
    }

    async fn join(&mut self, worker: JoinHandle<WorkerExit>) -> Result<SessionReport> {
        let exit = worker.await.map_err(RuntimeError::WorkerJoin)?;
        self.board = Some(exit.board);
        exit.result
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    board: Option<Box<dyn Board>>,
    executors: Option<ExecutorRegistry>,
    policy: Option<Arc<dyn TurnPolicy>>,
    clock: Option<Arc<dyn Clock>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            board: None,
            executors: None,
            policy: None,
            clock: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the board (required)
    pub fn board(mut self, board: impl Board + 'static) -> Self {
        self.board = Some(Box::new(board));
        self
    }

    /// Replace the executor registry.
    ///
    /// When unset, human and computer executors are registered and the
    /// computer one uses [`RuntimeBuilder::policy`].
    pub fn executors(mut self, executors: ExecutorRegistry) -> Self {
        self.executors = Some(executors);
        self
    }

    /// Computer turn policy (default: [`RandomPolicy`] seeded from
    /// `RuntimeConfig::rng_seed`). Ignored when a registry is supplied.
    pub fn policy(mut self, policy: impl TurnPolicy + 'static) -> Self {
        self.policy = Some(Arc::new(policy));
        self
    }

    /// Time source for computer delays (default: [`TokioClock`])
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<Runtime> {
        let board = self.board.ok_or(RuntimeError::MissingBoard)?;
        let config = self.config;

        let executors = match self.executors {
            Some(executors) => executors,
            None => {
                let policy = self
                    .policy
                    .unwrap_or_else(|| Arc::new(RandomPolicy::from_seed_option(config.rng_seed)));
                ExecutorRegistry::with_defaults(policy)
            }
        };

        let (selection_tx, selection_rx) = mpsc::channel(config.selection_buffer_size.max(1));
        let (phase_tx, phase_rx) = watch::channel(PhaseStatus::default());
        let event_bus = EventBus::with_capacity(config.event_buffer_size);

        let handle = GameHandle::new(selection_tx, phase_rx, event_bus);

        Ok(Runtime {
            config,
            handle,
            board: Some(board),
            executors,
            clock: self.clock.unwrap_or_else(|| Arc::new(TokioClock)),
            phase_tx: Arc::new(phase_tx),
            selections: Arc::new(Mutex::new(selection_rx)),
            session: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_values() {
        let config = RuntimeConfig::default();
        assert_eq!(config.cpu_turn_delay, Duration::from_secs(1));
        assert_eq!(config.selection_buffer_size, 16);
        assert_eq!(config.event_buffer_size, 100);
        assert_eq!(config.max_rounds, None);
        assert_eq!(config.rng_seed, None);
    }

    #[test]
    fn build_requires_a_board() {
        assert!(matches!(
            Runtime::builder().build(),
            Err(RuntimeError::MissingBoard)
        ));
    }
}
