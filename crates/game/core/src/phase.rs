//! Turn phase state machine.
//!
//! The phase is the rendezvous between the scheduler and the turn that is
//! currently running. Turn executors move it forward through one turn; the
//! scheduler only ever moves it from `Idle` to `GameOver`.
//!
//! ```text
//! Idle ──begin_turn──▶ WaitingForInput ──receive_input──▶ InputReceived
//!  ▲                        │    ▲                              │
//!  │                     (skip)  └──await_input (re-wait)       │ start_moving
//!  │                        ▼                                   ▼
//!  └────────finish_turn──── + ◀──────────finish_turn────────── Moving
//!
//! Idle ──game_over──▶ GameOver
//! ```
use strum::{Display, IntoStaticStr};

use crate::state::PlayerId;

/// Shared phase value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    WaitingForInput,
    InputReceived,
    Moving,
    GameOver,
}

impl Phase {
    /// True while some turn executor owns the phase.
    pub const fn is_turn_active(self) -> bool {
        matches!(
            self,
            Phase::WaitingForInput | Phase::InputReceived | Phase::Moving
        )
    }
}

/// Errors raised by illegal phase transitions.
///
/// These are invariant violations: a correct scheduler never produces them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PhaseError {
    #[error("turn for {requested} started while turn for {active} is still running")]
    TurnAlreadyActive {
        active: PlayerId,
        requested: PlayerId,
    },

    #[error("invalid phase transition {from} -> {to}")]
    InvalidTransition { from: Phase, to: Phase },
}

/// Phase value plus the player whose turn currently owns it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhaseMachine {
    phase: Phase,
    active: Option<PlayerId>,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Player whose turn is in flight, if any.
    pub fn active_player(&self) -> Option<PlayerId> {
        self.active
    }

    /// Idle → WaitingForInput.
    pub fn begin_turn(&mut self, player: PlayerId) -> Result<Phase, PhaseError> {
        if let Some(active) = self.active {
            return Err(PhaseError::TurnAlreadyActive {
                active,
                requested: player,
            });
        }
        self.expect(&[Phase::Idle], Phase::WaitingForInput)?;
        self.active = Some(player);
        Ok(self.set(Phase::WaitingForInput))
    }

    /// WaitingForInput → WaitingForInput, re-suspending after a rejected report.
    pub fn await_input(&mut self) -> Result<Phase, PhaseError> {
        self.expect(&[Phase::WaitingForInput], Phase::WaitingForInput)?;
        Ok(self.set(Phase::WaitingForInput))
    }

    /// WaitingForInput → InputReceived.
    pub fn receive_input(&mut self) -> Result<Phase, PhaseError> {
        self.expect(&[Phase::WaitingForInput], Phase::InputReceived)?;
        Ok(self.set(Phase::InputReceived))
    }

    /// InputReceived → Moving.
    pub fn start_moving(&mut self) -> Result<Phase, PhaseError> {
        self.expect(&[Phase::InputReceived], Phase::Moving)?;
        Ok(self.set(Phase::Moving))
    }

    /// Moving → Idle, or WaitingForInput → Idle for a skipped turn.
    pub fn finish_turn(&mut self) -> Result<Phase, PhaseError> {
        self.expect(&[Phase::Moving, Phase::WaitingForInput], Phase::Idle)?;
        self.active = None;
        Ok(self.set(Phase::Idle))
    }

    /// Idle → GameOver. Only the scheduler calls this.
    pub fn game_over(&mut self) -> Result<Phase, PhaseError> {
        self.expect(&[Phase::Idle], Phase::GameOver)?;
        Ok(self.set(Phase::GameOver))
    }

    /// Forces the machine back to Idle, returning the interrupted player.
    pub fn abort(&mut self) -> Option<PlayerId> {
        self.phase = Phase::Idle;
        self.active.take()
    }

    /// Fresh game instance.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn expect(&self, allowed: &[Phase], to: Phase) -> Result<(), PhaseError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(PhaseError::InvalidTransition {
                from: self.phase,
                to,
            })
        }
    }

    fn set(&mut self, phase: Phase) -> Phase {
        self.phase = phase;
        phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: PlayerId = PlayerId(7);

    #[test]
    fn full_turn_cycle() {
        let mut m = PhaseMachine::new();
        assert_eq!(m.begin_turn(P), Ok(Phase::WaitingForInput));
        assert_eq!(m.active_player(), Some(P));
        assert_eq!(m.await_input(), Ok(Phase::WaitingForInput));
        assert_eq!(m.receive_input(), Ok(Phase::InputReceived));
        assert_eq!(m.start_moving(), Ok(Phase::Moving));
        assert_eq!(m.finish_turn(), Ok(Phase::Idle));
        assert_eq!(m.active_player(), None);
    }

    #[test]
    fn second_turn_while_active_is_rejected() {
        let mut m = PhaseMachine::new();
        m.begin_turn(P).unwrap();
        assert_eq!(
            m.begin_turn(PlayerId(8)),
            Err(PhaseError::TurnAlreadyActive {
                active: P,
                requested: PlayerId(8),
            })
        );
    }

    #[test]
    fn cannot_skip_states() {
        let mut m = PhaseMachine::new();
        assert!(m.receive_input().is_err());
        m.begin_turn(P).unwrap();
        assert_eq!(
            m.start_moving(),
            Err(PhaseError::InvalidTransition {
                from: Phase::WaitingForInput,
                to: Phase::Moving,
            })
        );
    }

    #[test]
    fn game_over_only_from_idle() {
        let mut m = PhaseMachine::new();
        m.begin_turn(P).unwrap();
        assert!(m.game_over().is_err());
        m.finish_turn().unwrap();
        assert_eq!(m.game_over(), Ok(Phase::GameOver));
        assert!(m.begin_turn(P).is_err());
    }

    #[test]
    fn abort_returns_interrupted_player() {
        let mut m = PhaseMachine::new();
        assert_eq!(m.abort(), None);
        m.begin_turn(P).unwrap();
        m.receive_input().unwrap();
        assert_eq!(m.abort(), Some(P));
        assert_eq!(m.phase(), Phase::Idle);
        assert!(m.begin_turn(P).is_ok());
    }
}
