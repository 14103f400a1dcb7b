use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::*;

/// Persisted form of a board: the mine layout and what produced it, never the
/// opened or flagged state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub seed: u64,
    pub n_rows: Coord,
    pub n_cols: Coord,
    pub n_mines: CellCount,
    /// Row-major grid of `0`/`1`.
    pub board_mine: Vec<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_history: Option<Vec<String>>,
    /// Any other recorded values, such as `n_revealed_cells`.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl BoardSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn size(&self) -> Coord2 {
        (self.n_rows, self.n_cols)
    }

    pub fn mine_layout(&self) -> Result<MineLayout> {
        let rows: Vec<Vec<bool>> = self
            .board_mine
            .iter()
            .map(|row| row.iter().map(|&cell| cell != 0).collect())
            .collect();
        MineLayout::from_rows(self.size(), &rows)
    }

    pub fn with_action_history(mut self, action_history: Vec<String>) -> Self {
        self.action_history = Some(action_history);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

impl Board {
    /// Snapshot of the placed mines, fails before the first reveal.
    pub fn to_snapshot(&self) -> Result<BoardSnapshot> {
        let layout = self.mine_layout().ok_or(GameError::MinesNotPlaced)?;
        let config = self.config();
        Ok(BoardSnapshot {
            seed: self.seed(),
            n_rows: config.rows(),
            n_cols: config.cols(),
            n_mines: config.mines,
            board_mine: layout
                .to_rows()
                .into_iter()
                .map(|row| row.into_iter().map(u8::from).collect())
                .collect(),
            action_history: None,
            attributes: Map::new(),
        })
    }

    /// Rebuilds a board awaiting its first move over the stored layout. The
    /// stored action history is only carried into the action log when asked
    /// for, it is never replayed here.
    pub fn from_snapshot(
        snapshot: &BoardSnapshot,
        options: BoardOptions,
        load_action_history: bool,
    ) -> Result<Self> {
        let config = GameConfig::new(snapshot.size(), snapshot.n_mines)?;
        let layout = snapshot.mine_layout()?;
        let mut board = Self::from_parts(config, snapshot.seed, options, Some(layout));
        if load_action_history {
            board.set_action_log(snapshot.action_history.clone().unwrap_or_default());
        }
        Ok(board)
    }
}
