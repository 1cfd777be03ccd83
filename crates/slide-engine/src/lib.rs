//! slide-engine: the sliding-tile merge engine behind a 2048-style puzzle.
//!
//! This crate provides:
//! - A square `Grid` of tile values with a single direction-agnostic
//!   compaction/merge pass (`Grid::apply`, `engine::apply`)
//! - A `Game` that owns a grid and its score, spawns tiles and detects
//!   terminal positions without touching the live grid
//!
//! Quick start:
//! ```
//! use slide_engine::engine::{Direction, Game, SpawnPolicy};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut game = Game::new(4, SpawnPolicy::default()).unwrap();
//! game.spawn_tile(&mut rng).unwrap();
//!
//! while !game.is_terminal() {
//!     let moved = Direction::ALL.iter().any(|&dir| game.apply_move(dir));
//!     if !moved {
//!         break;
//!     }
//!     game.spawn_tile(&mut rng).unwrap();
//! }
//! assert!(game.grid().highest_tile() >= 2);
//! ```
pub mod engine;
