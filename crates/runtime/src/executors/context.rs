use std::sync::Arc;
use std::time::Duration;

use beam_core::{Board, ControllerKind, Phase, PhaseError, PhaseMachine, Player, PlayerId, Space};
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use super::TurnOutcome;
use crate::api::{Result, RuntimeError};
use crate::clock::Clock;
use crate::events::{Event, EventBus, PhaseEvent, TurnEvent};

/// What handles observe of the phase machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct PhaseStatus {
    pub phase: Phase,
    /// Controller of the player in turn; `None` outside a turn.
    pub controller: Option<ControllerKind>,
}

/// Phase machine that announces every transition.
///
/// The current phase is mirrored into a `watch` channel so handles can gate
/// selection reports and wait on phases without touching the machine.
pub struct PhaseCell {
    machine: PhaseMachine,
    controller: Option<ControllerKind>,
    tx: Arc<watch::Sender<PhaseStatus>>,
    events: EventBus,
}

impl PhaseCell {
    pub(crate) fn new(tx: Arc<watch::Sender<PhaseStatus>>, events: EventBus) -> Self {
        tx.send_replace(PhaseStatus::default());
        Self {
            machine: PhaseMachine::new(),
            controller: None,
            tx,
            events,
        }
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn active_player(&self) -> Option<PlayerId> {
        self.machine.active_player()
    }

    pub fn begin_turn(&mut self, player: &Player) -> Result<()> {
        let previous = self.controller.replace(player.controller);
        let result = self.transition(|m| m.begin_turn(player.id));
        if result.is_err() {
            self.controller = previous;
        }
        result
    }

    pub fn await_input(&mut self) -> Result<()> {
        self.transition(PhaseMachine::await_input)
    }

    pub fn receive_input(&mut self) -> Result<()> {
        self.transition(PhaseMachine::receive_input)
    }

    pub fn start_moving(&mut self) -> Result<()> {
        self.transition(PhaseMachine::start_moving)
    }

    pub fn finish_turn(&mut self) -> Result<()> {
        self.transition(PhaseMachine::finish_turn)
    }

    pub fn game_over(&mut self) -> Result<()> {
        self.transition(PhaseMachine::game_over)
    }

    /// Forces Idle and returns the player whose turn was interrupted.
    pub fn abort(&mut self) -> Option<PlayerId> {
        let from = self.machine.phase();
        let interrupted = self.machine.abort();
        if from != Phase::Idle {
            self.announce(from, interrupted);
        }
        interrupted
    }

    fn transition(
        &mut self,
        step: impl FnOnce(&mut PhaseMachine) -> std::result::Result<Phase, PhaseError>,
    ) -> Result<()> {
        let from = self.machine.phase();
        let before = self.machine.active_player();
        step(&mut self.machine).map_err(RuntimeError::from)?;
        let player = self.machine.active_player().or(before);
        if self.machine.phase() != from {
            self.announce(from, player);
        }
        Ok(())
    }

    fn announce(&self, from: Phase, player: Option<PlayerId>) {
        let to = self.machine.phase();
        let controller = if to.is_turn_active() {
            self.controller
        } else {
            None
        };
        self.tx.send_replace(PhaseStatus { phase: to, controller });
        self.events.publish(Event::Phase(PhaseEvent { from, to, player }));
    }
}

/// Everything one turn may touch, borrowed for the duration of that turn.
pub struct TurnContext<'a> {
    pub player: Player,
    /// Legal-candidate set, computed fresh at turn start.
    pub candidates: Vec<Space>,
    pub board: &'a mut dyn Board,
    pub phase: &'a mut PhaseCell,
    pub selections: &'a mut mpsc::Receiver<Space>,
    pub clock: &'a dyn Clock,
    pub events: &'a EventBus,
    pub cpu_turn_delay: Duration,
}

impl TurnContext<'_> {
    pub fn publish(&self, event: TurnEvent) {
        self.events.publish(Event::Turn(event));
    }

    pub fn announce_start(&self) {
        self.publish(TurnEvent::Started {
            player: self.player.id,
            controller: self.player.controller,
            candidates: self.candidates.clone(),
        });
    }

    /// Highlights (or clears) the candidate spaces and the active piece.
    pub fn highlight_candidates(&mut self, on: bool) {
        self.board
            .set_candidate_highlight(self.player.id, &self.candidates, on);
    }

    /// Highlights (or clears) only the active piece.
    pub fn highlight_piece(&mut self, on: bool) {
        self.board.set_candidate_highlight(self.player.id, &[], on);
    }

    /// Drops reports queued before this turn started.
    pub fn discard_stale_selections(&mut self) -> usize {
        let mut dropped = 0;
        while self.selections.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            debug!(
                target: "beam::turn",
                player = %self.player.id,
                dropped,
                "Discarded stale selection reports"
            );
        }
        dropped
    }

    /// Suspends until the next selection report arrives.
    pub async fn next_selection(&mut self) -> Result<Space> {
        self.selections
            .recv()
            .await
            .ok_or(RuntimeError::SelectionChannelClosed)
    }

    /// Moving: applies the move through the board. Call with phase == Moving.
    pub fn apply_move(&mut self, to: Space) -> TurnOutcome {
        let player = self.player.id;
        let from = self.player.position;

        match self.board.try_move(player, to) {
            Ok(()) => {
                self.player.position = to;
                debug!(target: "beam::turn", %player, %from, %to, "Move applied");
                self.publish(TurnEvent::MoveApplied { player, from, to });
                TurnOutcome::Moved { from, to }
            }
            Err(error) => {
                warn!(
                    target: "beam::turn",
                    %player,
                    %to,
                    error = %error,
                    "Board rejected move"
                );
                self.publish(TurnEvent::MoveRejected {
                    player,
                    to,
                    reason: error.to_string(),
                });
                TurnOutcome::Rejected { to }
            }
        }
    }

    /// Ends a turn that never left WaitingForInput.
    pub fn skip(&mut self) -> Result<TurnOutcome> {
        debug!(target: "beam::turn", player = %self.player.id, "Turn skipped");
        self.publish(TurnEvent::Skipped {
            player: self.player.id,
        });
        self.phase.finish_turn()?;
        Ok(TurnOutcome::Skipped)
    }
}
