use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::*;

/// Seeded placement that draws one uniform value per cell and marks every
/// cell at or below the `mines`-th smallest value as a mine.
///
/// When the excluded cell would be a mine the threshold moves up to the
/// `(mines + 1)`-th smallest value and the excluded cell is cleared. On a
/// completely full board there is no next value, so the result carries one
/// mine fewer than requested.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdLayoutGenerator {
    seed: u64,
    exclude: Option<Coord2>,
}

impl ThresholdLayoutGenerator {
    pub fn new(seed: u64, exclude: Option<Coord2>) -> Self {
        Self { seed, exclude }
    }
}

impl LayoutGenerator for ThresholdLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        let total_cells = config.total_cells();
        let mines = if config.mines > total_cells {
            log::warn!(
                "Minefield already full, generated anyway, requested {} but only fits {}",
                config.mines,
                total_cells
            );
            total_cells
        } else {
            config.mines
        };

        // one generator per placement, owned here and seeded from the board
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let values = Array2::from_shape_simple_fn(config.size.to_nd_index(), || {
            rng.random::<f64>()
        });

        let exclude = self.exclude.filter(|&(row, col)| {
            let in_bounds = row < config.rows() && col < config.cols();
            if !in_bounds {
                log::warn!("Ignoring out of bounds exclusion {:?}", (row, col));
            }
            in_bounds
        });
        let mine_mask = place_by_threshold(&values, mines, exclude);

        let layout = MineLayout::from_mine_mask(mine_mask);
        if layout.mine_count() != mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                mines
            );
        }
        layout
    }
}

/// Marks cells whose value is at or below the `mines`-th smallest value.
///
/// Equal values share a rank, so ties at the threshold all become mines.
pub fn place_by_threshold(
    values: &Array2<f64>,
    mines: CellCount,
    exclude: Option<Coord2>,
) -> Array2<bool> {
    let mut sorted: Vec<f64> = values.iter().copied().collect();
    sorted.sort_by(f64::total_cmp);

    let threshold_at = |rank: usize| -> f64 {
        match rank {
            0 => f64::NEG_INFINITY,
            rank if rank > sorted.len() => f64::INFINITY,
            rank => sorted[rank - 1],
        }
    };

    let threshold = threshold_at(mines.into());
    let mut mine_mask = values.mapv(|value| value <= threshold);

    if let Some(exclude) = exclude {
        if mine_mask[exclude.to_nd_index()] {
            log::debug!("Start cell {:?} drew a mine, moving threshold up", exclude);
            let threshold = threshold_at(usize::from(mines) + 1);
            mine_mask = values.mapv(|value| value <= threshold);
            mine_mask[exclude.to_nd_index()] = false;
        }
    }

    mine_mask
}
