use core::fmt;
use core::ops::Range;
use hashbrown::HashSet;

use super::*;

/// Dataset bucket by how many cells the opening move revealed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RevealBucket {
    UpTo10,
    UpTo20,
    UpTo30,
    UpTo40,
    Over40,
}

impl RevealBucket {
    pub const ALL: [Self; 5] = [
        Self::UpTo10,
        Self::UpTo20,
        Self::UpTo30,
        Self::UpTo40,
        Self::Over40,
    ];

    pub const fn from_revealed(revealed: CellCount) -> Self {
        match revealed {
            40.. => Self::Over40,
            30.. => Self::UpTo40,
            20.. => Self::UpTo30,
            10.. => Self::UpTo20,
            _ => Self::UpTo10,
        }
    }

    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::UpTo10 => "01-10",
            Self::UpTo20 => "10-20",
            Self::UpTo30 => "20-30",
            Self::UpTo40 => "30-40",
            Self::Over40 => "40-inf",
        }
    }
}

impl fmt::Display for RevealBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// A board after its opening move, ready to be stored.
#[derive(Clone, Debug)]
pub struct GeneratedBoard {
    pub seed: u64,
    pub bucket: RevealBucket,
    pub board: Board,
}

impl GeneratedBoard {
    pub fn file_name(&self) -> String {
        format!("{:03}.json", self.seed)
    }

    pub fn snapshot(&self) -> Result<BoardSnapshot> {
        Ok(self
            .board
            .to_snapshot()?
            .with_attribute("n_revealed_cells", self.board.revealed_count()))
    }
}

/// Makes one board per seed, opens the centre cell, and drops boards whose
/// mine layout was already produced by an earlier seed.
#[derive(Clone, Debug)]
pub struct BatchGenerator {
    config: GameConfig,
    options: BoardOptions,
}

impl BatchGenerator {
    pub fn new(config: GameConfig, options: BoardOptions) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines)?;
        Ok(Self { config, options })
    }

    /// The centre cell, rounding up on even sizes.
    pub fn opening_move(&self) -> Action {
        Action::Reveal {
            row: u32::from(self.config.rows()).div_ceil(2),
            col: u32::from(self.config.cols()).div_ceil(2),
        }
    }

    pub fn generate(&self, seeds: Range<u64>) -> Result<Vec<GeneratedBoard>> {
        let mut seen = HashSet::new();
        let mut boards = Vec::new();

        for seed in seeds {
            let mut board = Board::new(self.config, seed, self.options.clone())?;
            board.apply(self.opening_move());

            let Some(layout) = board.mine_layout() else {
                continue;
            };
            if !seen.insert(layout.clone()) {
                log::debug!("Seed {} repeats an earlier layout, skipping", seed);
                continue;
            }

            let bucket = RevealBucket::from_revealed(board.revealed_count());
            log::trace!("Seed {} revealed {} cells", seed, board.revealed_count());
            boards.push(GeneratedBoard {
                seed,
                bucket,
                board,
            });
        }

        Ok(boards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_follow_reveal_counts() {
        assert_eq!(RevealBucket::from_revealed(1), RevealBucket::UpTo10);
        assert_eq!(RevealBucket::from_revealed(10), RevealBucket::UpTo20);
        assert_eq!(RevealBucket::from_revealed(39), RevealBucket::UpTo40);
        assert_eq!(RevealBucket::from_revealed(40), RevealBucket::Over40);
        assert_eq!(RevealBucket::Over40.to_string(), "40-inf");
    }

    #[test]
    fn opening_move_is_centre() {
        let generator = BatchGenerator::new(GameConfig::default(), BoardOptions::default()).unwrap();
        assert_eq!(generator.opening_move(), Action::Reveal { row: 5, col: 5 });

        let config = GameConfig::new((4, 6), 3).unwrap();
        let generator = BatchGenerator::new(config, BoardOptions::default()).unwrap();
        assert_eq!(generator.opening_move(), Action::Reveal { row: 2, col: 3 });
    }

    #[test]
    fn duplicate_layouts_are_skipped() {
        let config = GameConfig::new((3, 3), 8).unwrap();
        let generator = BatchGenerator::new(config, BoardOptions::default()).unwrap();

        let boards = generator.generate(0..40).unwrap();

        // every seed mines the whole ring around the excluded centre
        assert_eq!(boards.len(), 1);
        let generated = &boards[0];
        assert_eq!(generated.seed, 0);
        assert_eq!(generated.board.revealed_count(), 1);
        assert_eq!(generated.board.cell_at((1, 1)), VisibleCell::Opened(8));
        assert_eq!(generated.bucket, RevealBucket::UpTo10);
    }

    #[test]
    fn snapshot_records_reveal_count() {
        let generator = BatchGenerator::new(GameConfig::default(), BoardOptions::default()).unwrap();
        let generated = generator.generate(7..8).unwrap().remove(0);

        let snapshot = generated.snapshot().unwrap();

        assert_eq!(generated.file_name(), "007.json");
        assert_eq!(snapshot.seed, 7);
        assert_eq!(
            snapshot.attribute("n_revealed_cells"),
            Some(&serde_json::Value::from(generated.board.revealed_count()))
        );
    }
}
