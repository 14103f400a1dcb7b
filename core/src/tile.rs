use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell, the only grid mutated during play.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibleCell {
    Unopened,
    Flagged,
    /// Opened safe cell with its neighbor mine count, `0` is a blank cell.
    Opened(u8),
    /// Only shown once the board froze after a loss.
    Mine,
}

impl VisibleCell {
    pub const fn is_unopened(self) -> bool {
        matches!(self, Self::Unopened)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    pub const fn is_opened(self) -> bool {
        matches!(self, Self::Opened(_))
    }
}

impl Default for VisibleCell {
    fn default() -> Self {
        Self::Unopened
    }
}

impl From<SolutionCell> for VisibleCell {
    fn from(cell: SolutionCell) -> Self {
        match cell {
            SolutionCell::Mine => Self::Mine,
            SolutionCell::Clear(count) => Self::Opened(count),
        }
    }
}

/// True content of a cell, derived once from the mine layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolutionCell {
    Mine,
    Clear(u8),
}

impl SolutionCell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_blank(self) -> bool {
        matches!(self, Self::Clear(0))
    }
}

impl Default for SolutionCell {
    fn default() -> Self {
        Self::Clear(0)
    }
}
