use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::{Board, BoardLayout, Facing, LayoutError, MoveError};
use crate::state::{PieceKind, Player, PlayerId, Roster, Space};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PlacedPiece {
    piece: PieceKind,
    position: Space,
    facing: Facing,
}

/// Rectangular reference board.
///
/// Rules:
/// - a piece may step onto any in-bounds, unoccupied orthogonal neighbour;
/// - every Eye lights the spaces along its facing until the edge or the
///   first Blocker, which shields everything behind it;
/// - Inhabitants standing on lit spaces are flagged. Eyes and Blockers are
///   never flagged.
///
/// Flags are only raised while the beam is visible.
#[derive(Clone, Debug)]
pub struct GridBoard {
    layout: BoardLayout,
    pieces: BTreeMap<PlayerId, PlacedPiece>,
    lit: BTreeSet<Space>,
    beam_visible: bool,
    highlighted_spaces: BTreeSet<Space>,
    highlighted_piece: Option<PlayerId>,
    released: Vec<PlayerId>,
}

impl GridBoard {
    pub fn new(layout: BoardLayout) -> Result<Self, LayoutError> {
        layout.validate()?;
        let mut board = Self {
            layout,
            pieces: BTreeMap::new(),
            lit: BTreeSet::new(),
            beam_visible: false,
            highlighted_spaces: BTreeSet::new(),
            highlighted_piece: None,
            released: Vec::new(),
        };
        board.reset();
        Ok(board)
    }

    pub fn standard() -> Self {
        Self::new(BoardLayout::standard()).expect("standard layout is valid")
    }

    pub fn occupant(&self, space: Space) -> Option<(PlayerId, PieceKind)> {
        self.pieces
            .iter()
            .find(|(_, placed)| placed.position == space)
            .map(|(id, placed)| (*id, placed.piece))
    }

    /// Spaces currently covered by the beam.
    pub fn lit_spaces(&self) -> &BTreeSet<Space> {
        &self.lit
    }

    pub fn highlighted_spaces(&self) -> &BTreeSet<Space> {
        &self.highlighted_spaces
    }

    pub fn highlighted_piece(&self) -> Option<PlayerId> {
        self.highlighted_piece
    }

    /// Pieces handed back through [`Board::release`] since the last reset.
    pub fn released(&self) -> &[PlayerId] {
        &self.released
    }

    fn is_occupied(&self, space: Space) -> bool {
        self.pieces.values().any(|p| p.position == space)
    }

    fn compute_lit(&self) -> BTreeSet<Space> {
        let mut lit = BTreeSet::new();
        for eye in self.pieces.values().filter(|p| p.piece == PieceKind::Eye) {
            let (d_up, d_across) = eye.facing.delta();
            let mut cursor = eye.position.offset(d_up, d_across);
            while self.layout.contains(cursor) {
                if matches!(self.occupant(cursor), Some((_, PieceKind::Blocker))) {
                    break;
                }
                lit.insert(cursor);
                cursor = cursor.offset(d_up, d_across);
            }
        }
        lit
    }
}

impl Board for GridBoard {
    fn reset(&mut self) -> Vec<Player> {
        self.pieces.clear();
        self.lit.clear();
        self.beam_visible = false;
        self.highlighted_spaces.clear();
        self.highlighted_piece = None;
        self.released.clear();

        self.layout
            .pieces
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let id = PlayerId(index as u32);
                self.pieces.insert(
                    id,
                    PlacedPiece {
                        piece: spec.piece,
                        position: spec.position,
                        facing: spec.facing,
                    },
                );
                Player::new(id, spec.piece, spec.position).with_controller(spec.controller())
            })
            .collect()
    }

    fn adjacent_spaces(&self, from: Space) -> Vec<Space> {
        from.neighbors4()
            .into_iter()
            .filter(|&n| self.layout.contains(n) && !self.is_occupied(n))
            .collect()
    }

    fn try_move(&mut self, player: PlayerId, to: Space) -> Result<(), MoveError> {
        let from = self
            .pieces
            .get(&player)
            .map(|p| p.position)
            .ok_or(MoveError::UnknownPlayer(player))?;

        if !self.layout.contains(to) {
            return Err(MoveError::OutOfBounds(to));
        }
        if !from.is_orthogonally_adjacent(to) {
            return Err(MoveError::NotAdjacent { from, to });
        }
        if self.is_occupied(to) {
            return Err(MoveError::Occupied(to));
        }

        if let Some(placed) = self.pieces.get_mut(&player) {
            placed.position = to;
        }
        debug!(target: "beam::board", %player, %from, %to, "Piece moved");
        Ok(())
    }

    fn evaluate_elimination(&mut self, roster: &Roster) -> Vec<usize> {
        if !self.beam_visible {
            return Vec::new();
        }

        roster
            .iter()
            .enumerate()
            .filter_map(|(index, player)| {
                let placed = self.pieces.get(&player.id)?;
                let flagged =
                    placed.piece == PieceKind::Inhabitant && self.lit.contains(&placed.position);
                flagged.then_some(index)
            })
            .collect()
    }

    fn update_beam(&mut self) {
        self.lit = self.compute_lit();
        self.beam_visible = true;
        debug!(target: "beam::board", lit = self.lit.len(), "Beam updated");
    }

    fn set_beam_visible(&mut self, visible: bool) {
        self.beam_visible = visible;
    }

    fn beam_visible(&self) -> bool {
        self.beam_visible
    }

    fn set_candidate_highlight(&mut self, player: PlayerId, spaces: &[Space], on: bool) {
        if on {
            self.highlighted_piece = Some(player);
            self.highlighted_spaces.extend(spaces.iter().copied());
        } else {
            if self.highlighted_piece == Some(player) {
                self.highlighted_piece = None;
            }
            for space in spaces {
                self.highlighted_spaces.remove(space);
            }
        }
    }

    fn release(&mut self, player: PlayerId) {
        if self.pieces.remove(&player).is_some() {
            self.released.push(player);
            // A removed Blocker no longer shields anything.
            self.lit = self.compute_lit();
        }
    }
}
