use std::collections::BTreeSet;

use super::{Player, PlayerId, Space};

/// Ordered sequence of live players. Order is turn order.
///
/// The order only changes through [`Roster::eliminate`], which removes
/// players without reordering the survivors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    players: Vec<Player>,
}

/// Result of removing flagged players from the roster mid-round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Elimination {
    /// Removed players with their index before removal, in turn order.
    pub removed: Vec<(usize, Player)>,

    /// Roster index the current round should visit next.
    ///
    /// Equals the number of survivors that came at or before the active
    /// index, so a value equal to the roster length ends the round.
    pub next_index: usize,
}

impl Elimination {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}

impl Roster {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn as_slice(&self) -> &[Player] {
        &self.players
    }

    pub fn ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    pub fn index_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    pub fn find(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Records a committed move. Returns false if the player is unknown.
    pub fn update_position(&mut self, id: PlayerId, position: Space) -> bool {
        match self.players.iter_mut().find(|p| p.id == id) {
            Some(player) => {
                player.position = position;
                true
            }
            None => false,
        }
    }

    /// Removes the flagged indices while the round cursor sits on `active`.
    ///
    /// Duplicate indices are collapsed and out-of-range indices are dropped.
    /// Removal runs in descending index order so earlier indices stay valid;
    /// the cursor for the rest of the round is derived from the survivors
    /// rather than by shifting `active`.
    pub fn eliminate(&mut self, flagged: &[usize], active: usize) -> Elimination {
        let len = self.players.len();
        let flagged: BTreeSet<usize> = flagged
            .iter()
            .copied()
            .filter(|&index| {
                let in_range = index < len;
                if !in_range {
                    tracing::warn!(
                        target: "beam::roster",
                        index,
                        len,
                        "Ignoring out-of-range elimination index"
                    );
                }
                in_range
            })
            .collect();

        let mut removed = Vec::with_capacity(flagged.len());
        for &index in flagged.iter().rev() {
            removed.push((index, self.players.remove(index)));
        }
        removed.reverse();

        let removed_at_or_before = flagged.range(..=active).count();
        let next_index = (active + 1).saturating_sub(removed_at_or_before).min(self.players.len());

        Elimination {
            removed,
            next_index,
        }
    }
}

impl FromIterator<Player> for Roster {
    fn from_iter<I: IntoIterator<Item = Player>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
