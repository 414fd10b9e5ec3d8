//! Board collaborator contract.
//!
//! The scheduler never looks inside the board: adjacency storage, piece
//! placement and the beam rules all sit behind [`Board`]. A reference
//! implementation, [`GridBoard`], ships for the terminal client and tests.
mod grid;
mod layout;

pub use grid::GridBoard;
pub use layout::{BoardLayout, Facing, LayoutError, PieceSpec};

use crate::state::{Player, PlayerId, Roster, Space};

/// Reasons a board rejects a move.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("player {0} has no piece on the board")]
    UnknownPlayer(PlayerId),

    #[error("space {0} is outside the board")]
    OutOfBounds(Space),

    #[error("space {0} is occupied")]
    Occupied(Space),

    #[error("space {to} is not adjacent to {from}")]
    NotAdjacent { from: Space, to: Space },
}

/// Board state and rules consumed by the turn scheduler.
///
/// All methods are synchronous; the scheduler calls them from a single task
/// so implementations need no internal locking.
pub trait Board: Send {
    /// Restores the starting layout and returns one player per starting
    /// piece, in turn order.
    fn reset(&mut self) -> Vec<Player>;

    /// Legal-candidate set for a piece standing on `from`.
    fn adjacent_spaces(&self, from: Space) -> Vec<Space>;

    /// Applies a move. Called at most once per turn.
    fn try_move(&mut self, player: PlayerId, to: Space) -> Result<(), MoveError>;

    /// Roster indices the beam flags for removal. Order is unspecified.
    fn evaluate_elimination(&mut self, roster: &Roster) -> Vec<usize>;

    /// Recomputes the beam after pieces moved.
    fn update_beam(&mut self);

    fn set_beam_visible(&mut self, visible: bool);

    fn beam_visible(&self) -> bool;

    /// Shows or hides the candidate spaces and the active piece marker.
    ///
    /// Setting the same state twice is a no-op.
    fn set_candidate_highlight(&mut self, player: PlayerId, spaces: &[Space], on: bool);

    /// Hands an eliminated piece back to its owner for cleanup.
    fn release(&mut self, _player: PlayerId) {}
}

impl<B: Board + ?Sized> Board for Box<B> {
    fn reset(&mut self) -> Vec<Player> {
        (**self).reset()
    }

    fn adjacent_spaces(&self, from: Space) -> Vec<Space> {
        (**self).adjacent_spaces(from)
    }

    fn try_move(&mut self, player: PlayerId, to: Space) -> Result<(), MoveError> {
        (**self).try_move(player, to)
    }

    fn evaluate_elimination(&mut self, roster: &Roster) -> Vec<usize> {
        (**self).evaluate_elimination(roster)
    }

    fn update_beam(&mut self) {
        (**self).update_beam()
    }

    fn set_beam_visible(&mut self, visible: bool) {
        (**self).set_beam_visible(visible)
    }

    fn beam_visible(&self) -> bool {
        (**self).beam_visible()
    }

    fn set_candidate_highlight(&mut self, player: PlayerId, spaces: &[Space], on: bool) {
        (**self).set_candidate_highlight(player, spaces, on)
    }

    fn release(&mut self, player: PlayerId) {
        (**self).release(player)
    }
}
