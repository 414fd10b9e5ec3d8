use beam_core::{Player, PlayerId};
use serde::{Deserialize, Serialize};

/// How a game instance ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Exactly one player survived.
    Winner(PlayerId),
    /// The last round eliminated everyone left.
    NoSurvivors,
    /// `max_rounds` elapsed with more than one player left.
    RoundLimit,
    /// The host exited mid-game.
    Aborted,
}

/// Summary returned once the scheduler stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub outcome: GameOutcome,
    /// Rounds started, counted from 1.
    pub rounds: u64,
    /// Roster at the moment the scheduler stopped, in turn order.
    pub survivors: Vec<Player>,
}
