//! Turn rules and data types for the beam board game.
//!
//! `beam-core` defines the canonical domain model (spaces, pieces, the turn
//! roster), the turn phase state machine, and the [`board::Board`]
//! collaborator trait the runtime drives. Everything here is synchronous and
//! free of I/O; the async scheduling lives in `beam-runtime`.
pub mod board;
pub mod phase;
pub mod state;

pub use board::{
    Board, BoardLayout, Facing, GridBoard, LayoutError, MoveError, PieceSpec,
};
pub use phase::{Phase, PhaseError, PhaseMachine};
pub use state::{
    ControllerKind, Elimination, PieceKind, Player, PlayerId, Roster, Space, SpaceParseError,
};
