use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// One player action, addressed with 1-based `(row, col)` as the agent sees them.
///
/// Canonical text form is `K(row,col)` with `L` for reveal, `M` for chord
/// reveal and `R` for flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Reveal { row: u32, col: u32 },
    Flag { row: u32, col: u32 },
    ChordReveal { row: u32, col: u32 },
}

impl Action {
    pub const fn from_code(code: char, row: u32, col: u32) -> Option<Self> {
        match code {
            'L' => Some(Self::Reveal { row, col }),
            'M' => Some(Self::ChordReveal { row, col }),
            'R' => Some(Self::Flag { row, col }),
            _ => None,
        }
    }

    pub const fn code(self) -> char {
        match self {
            Self::Reveal { .. } => 'L',
            Self::ChordReveal { .. } => 'M',
            Self::Flag { .. } => 'R',
        }
    }

    pub const fn position(self) -> (u32, u32) {
        match self {
            Self::Reveal { row, col } | Self::Flag { row, col } | Self::ChordReveal { row, col } => {
                (row, col)
            }
        }
    }

    /// Zero-based board coordinates, if the target lies on a board of `size`.
    pub fn locate(self, size: Coord2) -> Option<Coord2> {
        let (row, col) = self.position();
        let in_bounds = |index: u32, len: Coord| index >= 1 && index <= u32::from(len);
        if in_bounds(row, size.0) && in_bounds(col, size.1) {
            Some(((row - 1) as Coord, (col - 1) as Coord))
        } else {
            None
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (row, col) = self.position();
        write!(f, "{}({},{})", self.code(), row, col)
    }
}

impl FromStr for Action {
    type Err = GameError;

    /// Finds the first `K(row,col)` in `s`, allowing whitespace around the
    /// parentheses, numbers and comma.
    fn from_str(s: &str) -> Result<Self> {
        s.char_indices()
            .find_map(|(start, _)| parse_at(&s[start..]))
            .ok_or_else(|| GameError::MalformedAction(s.to_owned()))
    }
}

/// Small cursor over the remaining input of a single parse attempt.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, expected: char) -> Option<()> {
        self.rest = self.rest.strip_prefix(expected)?;
        Some(())
    }

    fn number(&mut self) -> Option<u32> {
        let end = self
            .rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.rest.len());
        let (digits, rest) = self.rest.split_at(end);
        if digits.is_empty() {
            return None;
        }
        self.rest = rest;
        // too large for any board, saturate so the action is rejected as off-board
        Some(digits.parse().unwrap_or(u32::MAX))
    }
}

fn parse_at(input: &str) -> Option<Action> {
    let code = input.chars().next()?;
    if !matches!(code, 'L' | 'M' | 'R') {
        return None;
    }

    let mut cursor = Cursor {
        rest: &input[code.len_utf8()..],
    };
    cursor.skip_whitespace();
    cursor.eat('(')?;
    cursor.skip_whitespace();
    let row = cursor.number()?;
    cursor.skip_whitespace();
    cursor.eat(',')?;
    cursor.skip_whitespace();
    let col = cursor.number()?;
    cursor.skip_whitespace();
    cursor.eat(')')?;

    Action::from_code(code, row, col)
}
