//! Scheduler worker that owns one game instance.
//!
//! Runs rounds over the [`Roster`], dispatches each turn to the executor
//! registered for the player's controller, applies the beam after every turn
//! and stops once one player (or none) is left.

use std::sync::Arc;
use std::time::Duration;

use beam_core::{Board, Player, PlayerId, Roster, Space};
use tokio::sync::{OwnedMutexGuard, mpsc, watch};
use tracing::{debug, error, info};

use crate::api::{GameOutcome, Result, SessionReport};
use crate::clock::Clock;
use crate::events::{Event, EventBus, GameEvent};
use crate::executors::{ExecutorRegistry, PhaseCell, TurnContext};

/// What the worker hands back when it stops. The board always comes back,
/// even when the game ended with an error.
pub struct WorkerExit {
    pub board: Box<dyn Board>,
    pub result: Result<SessionReport>,
}

enum TurnStatus {
    Completed,
    Aborted,
}

pub struct SchedulerWorker {
    board: Box<dyn Board>,
    roster: Roster,
    phase: PhaseCell,
    selections: OwnedMutexGuard<mpsc::Receiver<Space>>,
    executors: ExecutorRegistry,
    clock: Arc<dyn Clock>,
    event_bus: EventBus,
    exit_rx: watch::Receiver<bool>,
    cpu_turn_delay: Duration,
    max_rounds: Option<u64>,
}

impl SchedulerWorker {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        board: Box<dyn Board>,
        players: Vec<Player>,
        phase: PhaseCell,
        selections: OwnedMutexGuard<mpsc::Receiver<Space>>,
        executors: ExecutorRegistry,
        clock: Arc<dyn Clock>,
        event_bus: EventBus,
        exit_rx: watch::Receiver<bool>,
        cpu_turn_delay: Duration,
        max_rounds: Option<u64>,
    ) -> Self {
        Self {
            board,
            roster: Roster::new(players),
            phase,
            selections,
            executors,
            clock,
            event_bus,
            exit_rx,
            cpu_turn_delay,
            max_rounds,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) -> WorkerExit {
        let result = self.play().await;
        if let Err(error) = &result {
            error!(target: "beam::scheduler", %error, "Scheduler stopped with an error");
        }
        WorkerExit {
            board: self.board,
            result,
        }
    }

    async fn play(&mut self) -> Result<SessionReport> {
        info!(
            target: "beam::scheduler",
            players = self.roster.len(),
            max_rounds = ?self.max_rounds,
            "Game started"
        );
        self.board.update_beam();
        self.publish(GameEvent::Started {
            players: self.roster.as_slice().to_vec(),
        });

        let mut rounds: u64 = 0;
        let outcome = loop {
            if self.roster.len() <= 1 {
                break self.terminal_outcome();
            }
            if self.max_rounds.is_some_and(|max| rounds >= max) {
                info!(target: "beam::scheduler", rounds, "Round limit reached");
                break GameOutcome::RoundLimit;
            }

            rounds += 1;
            debug!(target: "beam::scheduler", round = rounds, "Round started");

            let mut active = 0;
            while active < self.roster.len() {
                if let TurnStatus::Aborted = self.run_turn(active).await? {
                    return Ok(self.report(GameOutcome::Aborted, rounds));
                }

                let flagged = self.board.evaluate_elimination(&self.roster);
                active = if flagged.is_empty() {
                    active + 1
                } else {
                    self.eliminate(&flagged, active)
                };

                if self.roster.len() <= 1 {
                    break;
                }
            }

            self.publish(GameEvent::RoundCompleted {
                round: rounds,
                remaining: self.roster.len(),
            });
        };

        self.phase.game_over()?;
        info!(target: "beam::scheduler", ?outcome, rounds, "Game over");
        self.publish(GameEvent::Over { outcome, rounds });
        Ok(self.report(outcome, rounds))
    }

    /// Runs the turn of the player at `active`, racing it against the exit
    /// signal.
    async fn run_turn(&mut self, active: usize) -> Result<TurnStatus> {
        let player = self.roster.as_slice()[active];
        let executor = self.executors.get(player.controller)?;
        let candidates = self.board.adjacent_spaces(player.position);
        let beam_visible = self.board.beam_visible();

        debug!(
            target: "beam::scheduler",
            player = %player.id,
            controller = %player.controller,
            executor = executor.name(),
            candidates = candidates.len(),
            "Dispatching turn"
        );

        let mut ctx = TurnContext {
            player,
            candidates,
            board: &mut *self.board,
            phase: &mut self.phase,
            selections: &mut *self.selections,
            clock: self.clock.as_ref(),
            events: &self.event_bus,
            cpu_turn_delay: self.cpu_turn_delay,
        };

        let finished = tokio::select! {
            biased;
            _ = exit_requested(&mut self.exit_rx) => None,
            result = executor.run(&mut ctx) => Some(result),
        };

        let TurnContext {
            player: updated,
            candidates,
            ..
        } = ctx;

        match finished {
            Some(result) => {
                result?;
                self.roster.update_position(updated.id, updated.position);
                Ok(TurnStatus::Completed)
            }
            None => {
                self.cancel_turn(player.id, &candidates, beam_visible);
                Ok(TurnStatus::Aborted)
            }
        }
    }

    /// Reverts the turn-local visual state of an interrupted turn.
    fn cancel_turn(&mut self, player: PlayerId, candidates: &[Space], beam_visible: bool) {
        self.board.set_candidate_highlight(player, candidates, false);
        self.board.set_beam_visible(beam_visible);
        let interrupted = self.phase.abort();

        info!(
            target: "beam::scheduler",
            player = %player,
            phase = %self.phase.phase(),
            "Game exited mid-turn"
        );
        self.publish(GameEvent::Aborted {
            player_in_turn: interrupted.or(Some(player)),
        });
    }

    /// Removes flagged players and returns the index of the next player in
    /// the round.
    fn eliminate(&mut self, flagged: &[usize], active: usize) -> usize {
        let elimination = self.roster.eliminate(flagged, active);
        for (index, player) in &elimination.removed {
            self.board.release(player.id);
            info!(
                target: "beam::scheduler",
                player = %player.id,
                piece = %player.piece,
                index,
                "Player eliminated"
            );
            self.publish(GameEvent::Eliminated {
                player: player.id,
                index: *index,
            });
        }
        elimination.next_index
    }

    fn terminal_outcome(&self) -> GameOutcome {
        match self.roster.as_slice() {
            [survivor] => GameOutcome::Winner(survivor.id),
            _ => GameOutcome::NoSurvivors,
        }
    }

    fn report(&self, outcome: GameOutcome, rounds: u64) -> SessionReport {
        SessionReport {
            outcome,
            rounds,
            survivors: self.roster.as_slice().to_vec(),
        }
    }

    fn publish(&self, event: GameEvent) {
        self.event_bus.publish(Event::Game(event));
    }
}

/// Resolves once exit is signalled or the runtime side is gone.
async fn exit_requested(exit_rx: &mut watch::Receiver<bool>) {
    loop {
        if *exit_rx.borrow_and_update() {
            return;
        }
        if exit_rx.changed().await.is_err() {
            return;
        }
    }
}
