use strum::{Display, EnumIter, IntoStaticStr};

use super::{PlayerId, Space};

/// Kinds of pieces on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PieceKind {
    /// Casts the beam. Computer-controlled unless configured otherwise.
    Eye,
    /// Stops the beam. Moving it re-evaluates the beam.
    Blocker,
    /// Ordinary piece; eliminated when caught in the beam.
    Inhabitant,
}

impl PieceKind {
    pub const fn is_blocker(self) -> bool {
        matches!(self, PieceKind::Blocker)
    }

    /// Controller a piece of this kind gets when the layout doesn't say.
    pub const fn default_controller(self) -> ControllerKind {
        match self {
            PieceKind::Eye => ControllerKind::Computer,
            PieceKind::Blocker | PieceKind::Inhabitant => ControllerKind::Human,
        }
    }
}

/// Who decides a player's moves.
///
/// New AI variants are added here and registered with the runtime's
/// executor registry; the scheduler itself never matches on this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum ControllerKind {
    Human,
    Computer,
}

/// One entry in the turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub piece: PieceKind,
    pub position: Space,
    pub controller: ControllerKind,
}

impl Player {
    /// Creates a player with the piece kind's default controller.
    pub fn new(id: PlayerId, piece: PieceKind, position: Space) -> Self {
        Self {
            id,
            piece,
            position,
            controller: piece.default_controller(),
        }
    }

    pub fn with_controller(mut self, controller: ControllerKind) -> Self {
        self.controller = controller;
        self
    }
}
