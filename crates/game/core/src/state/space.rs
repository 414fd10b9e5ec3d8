use std::fmt;
use std::str::FromStr;

/// Two-axis board coordinate.
///
/// `up` grows away from the seat of the first player, `across` grows to the
/// right. Both are signed so neighbour arithmetic never underflows; bounds are
/// the board's concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Space {
    pub up: i32,
    pub across: i32,
}

impl Space {
    pub const ORIGIN: Self = Self { up: 0, across: 0 };

    pub const fn new(up: i32, across: i32) -> Self {
        Self { up, across }
    }

    /// Returns the space offset by the given deltas.
    pub const fn offset(self, d_up: i32, d_across: i32) -> Self {
        Self {
            up: self.up + d_up,
            across: self.across + d_across,
        }
    }

    /// Orthogonal neighbours in a stable order: up, right, down, left.
    pub fn neighbors4(self) -> [Space; 4] {
        [
            self.offset(1, 0),
            self.offset(0, 1),
            self.offset(-1, 0),
            self.offset(0, -1),
        ]
    }

    pub fn is_orthogonally_adjacent(self, other: Space) -> bool {
        (self.up - other.up).abs() + (self.across - other.across).abs() == 1
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.up, self.across)
    }
}

/// Errors produced when parsing a [`Space`] from user text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpaceParseError {
    #[error("expected two coordinates `up across`, found {found}")]
    WrongArity { found: usize },

    #[error("invalid coordinate `{0}`")]
    InvalidCoordinate(String),
}

impl FromStr for Space {
    type Err = SpaceParseError;

    /// Accepts `"3 4"`, `"3,4"` and `"(3, 4)"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts: Vec<&str> = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();

        if parts.len() != 2 {
            return Err(SpaceParseError::WrongArity { found: parts.len() });
        }

        let parse = |raw: &str| {
            raw.parse::<i32>()
                .map_err(|_| SpaceParseError::InvalidCoordinate(raw.to_string()))
        };

        Ok(Space::new(parse(parts[0])?, parse(parts[1])?))
    }
}

/// Stable identity of a piece, shared with whoever renders it.
///
/// The scheduler only references the handle; the rendering side owns
/// whatever resources hang off it and is told when to release them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_spellings() {
        assert_eq!("3 4".parse::<Space>(), Ok(Space::new(3, 4)));
        assert_eq!("3,4".parse::<Space>(), Ok(Space::new(3, 4)));
        assert_eq!(" (0, -2) ".parse::<Space>(), Ok(Space::new(0, -2)));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            "3".parse::<Space>(),
            Err(SpaceParseError::WrongArity { found: 1 })
        );
        assert_eq!(
            "3 x".parse::<Space>(),
            Err(SpaceParseError::InvalidCoordinate("x".into()))
        );
    }

    #[test]
    fn neighbours_are_adjacent() {
        let origin = Space::new(2, 2);
        for n in origin.neighbors4() {
            assert!(origin.is_orthogonally_adjacent(n));
        }
        assert!(!origin.is_orthogonally_adjacent(Space::new(3, 3)));
        assert!(!origin.is_orthogonally_adjacent(origin));
    }
}
