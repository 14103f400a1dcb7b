use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Zero-based `(row, col)` coordinates.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Board size of any grid, as `(rows, cols)`.
pub(crate) fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let (rows, cols) = grid.dim();
    // grids are only ever built from a `Coord2` size
    (rows as Coord, cols as Coord)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, grid_size(self))
    }
}

/// Iterates every position in a grid of `size`, row-major.
pub fn iter_coords(size: Coord2) -> impl Iterator<Item = Coord2> {
    let (rows, cols) = size;
    (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
}

/// Clipped 8-neighborhood of a cell in row-major order, no wraparound.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    row_end: Coord,
    col_start: Coord,
    col_end: Coord,
    cursor: Option<Coord2>,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        let (row, col) = center;
        let (rows, cols) = bounds;
        let window = |pos: Coord, len: Coord| {
            (
                pos.saturating_sub(1),
                pos.saturating_add(1).min(len.saturating_sub(1)),
            )
        };
        let (row_start, row_end) = window(row, rows);
        let (col_start, col_end) = window(col, cols);

        Self {
            center,
            row_end,
            col_start,
            col_end,
            cursor: (row < rows && col < cols).then_some((row_start, col_start)),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (row, col) = self.cursor?;
            self.cursor = if col < self.col_end {
                Some((row, col + 1))
            } else if row < self.row_end {
                Some((row + 1, self.col_start))
            } else {
                None
            };

            if (row, col) != self.center {
                return Some((row, col));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), (3, 3)).collect();
        assert_eq!(neighbors, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        assert_eq!(NeighborIter::new((1, 1), (3, 3)).count(), 8);
    }

    #[test]
    fn edge_neighbors_are_row_major() {
        let neighbors: Vec<_> = NeighborIter::new((1, 2), (3, 3)).collect();
        assert_eq!(neighbors, vec![(0, 1), (0, 2), (1, 1), (2, 1), (2, 2)]);
    }

    #[test]
    fn out_of_bounds_center_has_no_neighbors() {
        assert_eq!(NeighborIter::new((3, 0), (3, 3)).count(), 0);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn iter_coords_is_row_major() {
        let coords: Vec<_> = iter_coords((2, 2)).collect();
        assert_eq!(coords, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }
}
