use core::fmt::{self, Write as _};
use serde::{Deserialize, Serialize};

use crate::*;

/// Mine cells only ever show up after a loss and always render the same way.
pub const MINE_SYMBOL: char = '*';

/// Configurable symbols for the cell states an agent sees during play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Symbols {
    pub unopened: char,
    pub flag: char,
    pub blank: char,
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            unopened: '?',
            flag: 'F',
            blank: '.',
        }
    }
}

impl Symbols {
    pub fn symbol(&self, cell: VisibleCell) -> char {
        match cell {
            VisibleCell::Unopened => self.unopened,
            VisibleCell::Flagged => self.flag,
            VisibleCell::Opened(0) => self.blank,
            // neighbor counts never exceed 8
            VisibleCell::Opened(count) => char::from(b'0' + count),
            VisibleCell::Mine => MINE_SYMBOL,
        }
    }
}

impl Board {
    pub fn symbol_at(&self, coords: Coord2) -> char {
        self.options().symbols.symbol(self.cell_at(coords))
    }

    /// Comma separated grid, one board row per line.
    ///
    /// Cells are quoted as `` `x' ``, except mines which read `'*'`. With
    /// `with_indices` a header row and column of double-quoted 1-based
    /// indices is added, the corner holding `"0"`.
    pub fn to_table(&self, with_indices: bool) -> String {
        let (rows, cols) = self.size();
        let mut lines = Vec::with_capacity(usize::from(rows) + 1);

        if with_indices {
            let header: Vec<String> = (0..=u32::from(cols)).map(|col| format!("\"{col}\"")).collect();
            lines.push(header.join(","));
        }

        for row in 0..rows {
            let mut cells = Vec::with_capacity(usize::from(cols) + 1);
            if with_indices {
                cells.push(format!("\"{}\"", u32::from(row) + 1));
            }
            for col in 0..cols {
                cells.push(match self.symbol_at((row, col)) {
                    MINE_SYMBOL => format!("'{MINE_SYMBOL}'"),
                    symbol => format!("`{symbol}'"),
                });
            }
            lines.push(cells.join(","));
        }

        lines.join("\n")
    }

    /// One `(row,col): symbol` line per cell, row-major with 1-based indices.
    pub fn to_coordinate_map(&self) -> String {
        let mut out = String::new();
        for (index, (row, col)) in iter_coords(self.size()).enumerate() {
            if index > 0 {
                out.push('\n');
            }
            // writing into a String cannot fail
            let _ = write!(
                out,
                "({},{}): {}",
                u32::from(row) + 1,
                u32::from(col) + 1,
                self.symbol_at((row, col))
            );
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_table(true))
    }
}
