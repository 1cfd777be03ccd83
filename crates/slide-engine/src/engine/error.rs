use super::grid::Tile;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("grid size must be at least 1")]
    ZeroSize,
    #[error("a {0}x{0} grid has more cells than can be addressed")]
    TooLarge(usize),
    #[error("grid is not square: row {row} has {len} cells, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("cell ({row}, {col}) holds {value}, which is not a tile value")]
    InvalidTile { row: usize, col: usize, value: Tile },
    #[error("spawn probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
    #[error("no empty slot available")]
    NoEmptySlot,
}
