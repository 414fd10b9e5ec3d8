//! Event types for different topics.

use beam_core::{ControllerKind, Phase, Player, PlayerId, Space};
use serde::{Deserialize, Serialize};

use crate::api::GameOutcome;

/// A single phase transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseEvent {
    pub from: Phase,
    pub to: Phase,
    /// Player whose turn owns the phase, if any.
    pub player: Option<PlayerId>,
}

/// Events emitted while a single turn runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// A turn began; `candidates` is the legal-candidate set.
    Started {
        player: PlayerId,
        controller: ControllerKind,
        candidates: Vec<Space>,
    },

    /// A reported space was outside the candidate set; the turn keeps waiting.
    SelectionRejected { player: PlayerId, space: Space },

    MoveApplied {
        player: PlayerId,
        from: Space,
        to: Space,
    },

    /// The board refused the move. The turn ends without moving.
    MoveRejected {
        player: PlayerId,
        to: Space,
        reason: String,
    },

    /// The turn ended without a move (no candidates, or the policy passed).
    Skipped { player: PlayerId },
}

/// Game lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started { players: Vec<Player> },

    /// A player was removed by the beam. `index` is its roster index
    /// before removal.
    Eliminated { player: PlayerId, index: usize },

    RoundCompleted { round: u64, remaining: usize },

    Over { outcome: GameOutcome, rounds: u64 },

    /// The host exited mid-game.
    Aborted { player_in_turn: Option<PlayerId> },
}
