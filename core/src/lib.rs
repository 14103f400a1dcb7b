//! Deterministic Minesweeper engine used as an evaluation environment for
//! agents that play through a textual action interface.

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use action::*;
pub use engine::*;
pub use error::*;
pub use feedback::*;
pub use generator::*;
pub use render::*;
pub use replay::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod action;
mod engine;
mod error;
mod feedback;
mod generator;
mod render;
mod replay;
mod snapshot;
mod tile;
mod types;

/// Board dimensions and the number of mines to place.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validates that the board is non-empty and can hold `mines`.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        let config = Self::new_unchecked(size, mines);
        if mines > config.total_cells() {
            return Err(GameError::TooManyMines {
                mines,
                capacity: config.total_cells(),
            });
        }
        Ok(config)
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((9, 9), 10)
    }
}

/// Fixed boolean grid marking mine cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    /// Builds a layout from row-major rows, every row must have `size.1` cells.
    pub fn from_rows(size: Coord2, rows: &[Vec<bool>]) -> Result<Self> {
        if rows.len() != usize::from(size.0) || rows.iter().any(|row| row.len() != usize::from(size.1)) {
            return Err(GameError::InvalidBoardShape);
        }

        let cells = rows.iter().flatten().copied().collect();
        let mine_mask = Array2::from_shape_vec(size.to_nd_index(), cells)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.mine_mask.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.mine_mask)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }

    /// Derives the fully resolved board: mines stay mines, every other cell
    /// gets its clipped 8-neighborhood mine count.
    pub fn solution(&self) -> Array2<SolutionCell> {
        let size = self.size();
        let mut solution = Array2::default(size.to_nd_index());
        for coords in iter_coords(size) {
            solution[coords.to_nd_index()] = if self[coords] {
                SolutionCell::Mine
            } else {
                SolutionCell::Clear(self.adjacent_mine_count(coords))
            };
        }
        solution
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.mine_mask[(row as usize, col as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_more_mines_than_cells() {
        let err = GameConfig::new((2, 2), 5).unwrap_err();
        assert!(matches!(
            err,
            GameError::TooManyMines {
                mines: 5,
                capacity: 4
            }
        ));
    }

    #[test]
    fn config_accepts_full_board() {
        assert!(GameConfig::new((2, 2), 4).is_ok());
    }

    #[test]
    fn solution_counts_clipped_neighbors() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();
        let solution = layout.solution();

        assert_eq!(solution[[0, 0]], SolutionCell::Mine);
        assert_eq!(solution[[1, 1]], SolutionCell::Clear(2));
        assert_eq!(solution[[0, 2]], SolutionCell::Clear(0));
        assert_eq!(solution[[2, 0]], SolutionCell::Clear(0));
        assert_eq!(solution[[0, 1]], SolutionCell::Clear(1));
        assert_eq!(solution[[2, 2]], SolutionCell::Mine);
    }

    #[test]
    fn rows_round_trip_through_layout() {
        let rows = vec![vec![true, false, false], vec![false, false, true]];
        let layout = MineLayout::from_rows((2, 3), &rows).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert!(layout.contains_mine((1, 2)));
        assert_eq!(layout.to_rows(), rows);
    }

    #[test]
    fn from_rows_rejects_ragged_grid() {
        let rows = vec![vec![true, false], vec![false]];
        assert!(matches!(
            MineLayout::from_rows((2, 2), &rows),
            Err(GameError::InvalidBoardShape)
        ));
    }
}
