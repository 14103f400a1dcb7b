use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines: requested {mines} but the board only fits {capacity}")]
    TooManyMines { mines: CellCount, capacity: CellCount },
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Mines have not been placed yet")]
    MinesNotPlaced,
    #[error("Malformed action: {0:?}")]
    MalformedAction(String),
    #[error("Snapshot encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = core::result::Result<T, GameError>;
