//! Engine module: square tile grid, the directional merge pass, and the
//! game state that owns a grid plus its score.
//!
//! - `Grid` is the N×N board with accessors and `apply`.
//! - Free functions mirror the methods when convenient (e.g., `apply`).
//! - `Game` adds score accounting, spawning and terminal detection.

mod error;
pub mod grid;
mod ops;
pub mod state;

pub use error::EngineError;
pub use grid::{Direction, Grid, MoveOutcome, Tile};
pub use ops::{apply, is_terminal};
pub use state::{Game, Score, SpawnPolicy};
