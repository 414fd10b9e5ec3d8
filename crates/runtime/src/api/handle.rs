//! Cloneable façade handed to selection sources and renderers.
//!
//! [`GameHandle`] hides channel plumbing: it forwards selection reports to
//! the running turn, mirrors the current phase, and streams events from
//! specific topics.
use beam_core::{ControllerKind, Phase, Space};
use tokio::sync::{broadcast, mpsc, watch};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::executors::PhaseStatus;

/// Host-facing handle to a [`crate::Runtime`].
///
/// Stays valid across game instances; reports only reach a turn that was
/// waiting for input when they were made.
#[derive(Clone)]
pub struct GameHandle {
    selection_tx: mpsc::Sender<Space>,
    phase_rx: watch::Receiver<PhaseStatus>,
    event_bus: EventBus,
}

impl GameHandle {
    pub(crate) fn new(
        selection_tx: mpsc::Sender<Space>,
        phase_rx: watch::Receiver<PhaseStatus>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            selection_tx,
            phase_rx,
            event_bus,
        }
    }

    /// Reports the space a selection resolved to.
    ///
    /// Returns `false` without queueing anything unless a human turn is
    /// `WaitingForInput`, or when the selection buffer is full. A computer
    /// turn also waits in that phase while it is thinking, and reports made
    /// then are refused.
    pub fn report_selection(&self, space: Space) -> bool {
        if !self.awaiting_human() {
            tracing::trace!(target: "beam::handle", %space, "Ignoring selection outside a human input phase");
            return false;
        }

        match self.selection_tx.try_send(space) {
            Ok(()) => true,
            Err(error) => {
                tracing::debug!(target: "beam::handle", %space, %error, "Selection dropped");
                false
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase_rx.borrow().phase
    }

    /// Controller of the player whose turn is in progress.
    pub fn active_controller(&self) -> Option<ControllerKind> {
        self.phase_rx.borrow().controller
    }

    /// True while a human-controlled turn waits for a selection.
    pub fn awaiting_human(&self) -> bool {
        let status = *self.phase_rx.borrow();
        status.phase == Phase::WaitingForInput && status.controller == Some(ControllerKind::Human)
    }

    /// Resolves once the phase equals `phase` (immediately if it already does).
    pub async fn wait_for_phase(&self, phase: Phase) -> Result<()> {
        let mut rx = self.phase_rx.clone();
        rx.wait_for(|current| current.phase == phase)
            .await
            .map(|_| ())
            .map_err(|_| RuntimeError::PhaseChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Phase` - every phase transition
    /// - `Topic::Turn` - candidates, selections and moves
    /// - `Topic::Game` - start, eliminations, rounds and game over
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Every topic through one receiver, in publish order.
    pub fn subscribe_all(&self) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe_all()
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
