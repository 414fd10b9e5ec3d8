use std::collections::BTreeSet;

use strum::Display;

use crate::state::{ControllerKind, PieceKind, Space};

/// Direction an Eye casts its beam.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Facing {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Facing {
    /// `(d_up, d_across)` step along this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Facing::Up => (1, 0),
            Facing::Right => (0, 1),
            Facing::Down => (-1, 0),
            Facing::Left => (0, -1),
        }
    }
}

/// Starting placement of one piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceSpec {
    pub piece: PieceKind,
    pub position: Space,
    pub facing: Facing,
    /// Overrides [`PieceKind::default_controller`].
    pub controller: Option<ControllerKind>,
}

impl PieceSpec {
    pub const fn new(piece: PieceKind, position: Space) -> Self {
        Self {
            piece,
            position,
            facing: Facing::Up,
            controller: None,
        }
    }

    pub const fn facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    pub const fn controlled_by(mut self, controller: ControllerKind) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn controller(&self) -> ControllerKind {
        self.controller
            .unwrap_or_else(|| self.piece.default_controller())
    }
}

/// Errors detected while validating a [`BoardLayout`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("board must be at least 1x1, got {rows}x{cols}")]
    EmptyBoard { rows: u32, cols: u32 },

    #[error("piece at {0} is outside the board")]
    OutOfBounds(Space),

    #[error("two pieces start on {0}")]
    Overlap(Space),
}

/// Board dimensions and starting pieces. Piece order is turn order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardLayout {
    pub rows: u32,
    pub cols: u32,
    pub pieces: Vec<PieceSpec>,
}

impl BoardLayout {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            pieces: Vec::new(),
        }
    }

    pub fn with_piece(mut self, spec: PieceSpec) -> Self {
        self.pieces.push(spec);
        self
    }

    /// 7x7 board: a Blocker and three Inhabitants against one Eye watching
    /// the centre column from the bottom edge.
    pub fn standard() -> Self {
        Self::new(7, 7)
            .with_piece(PieceSpec::new(PieceKind::Blocker, Space::new(5, 3)))
            .with_piece(PieceSpec::new(PieceKind::Inhabitant, Space::new(6, 1)))
            .with_piece(PieceSpec::new(PieceKind::Inhabitant, Space::new(6, 4)))
            .with_piece(PieceSpec::new(PieceKind::Inhabitant, Space::new(6, 6)))
            .with_piece(PieceSpec::new(PieceKind::Eye, Space::new(0, 3)).facing(Facing::Up))
    }

    pub fn contains(&self, space: Space) -> bool {
        space.up >= 0
            && space.across >= 0
            && (space.up as u32) < self.rows
            && (space.across as u32) < self.cols
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(LayoutError::EmptyBoard {
                rows: self.rows,
                cols: self.cols,
            });
        }

        let mut seen = BTreeSet::new();
        for spec in &self.pieces {
            if !self.contains(spec.position) {
                return Err(LayoutError::OutOfBounds(spec.position));
            }
            if !seen.insert(spec.position) {
                return Err(LayoutError::Overlap(spec.position));
            }
        }
        Ok(())
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::standard()
    }
}
