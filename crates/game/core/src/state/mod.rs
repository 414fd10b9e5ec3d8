//! Board-level state shared by the scheduler and the board collaborator.
mod piece;
mod roster;
mod space;

pub use piece::{ControllerKind, PieceKind, Player};
pub use roster::{Elimination, Roster};
pub use space::{PlayerId, Space, SpaceParseError};
