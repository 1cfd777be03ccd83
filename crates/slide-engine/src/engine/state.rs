use log::debug;
use rand::Rng;

use super::error::EngineError;
use super::grid::{Direction, Grid, Tile};
use super::ops;

pub type Score = u64;

/// Odds of spawning a 4 instead of a 2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPolicy {
    four_probability: f64,
}

impl SpawnPolicy {
    pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.05;

    pub fn new(four_probability: f64) -> Result<Self, EngineError> {
        if !(0.0..=1.0).contains(&four_probability) {
            return Err(EngineError::InvalidProbability(four_probability));
        }
        Ok(SpawnPolicy { four_probability })
    }

    #[inline]
    pub fn four_probability(&self) -> f64 {
        self.four_probability
    }

    /// Draw the value of a freshly spawned tile.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Tile {
        if rng.gen_bool(self.four_probability) {
            4
        } else {
            2
        }
    }
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        SpawnPolicy {
            four_probability: Self::DEFAULT_FOUR_PROBABILITY,
        }
    }
}

/// A running game: the canonical grid plus its cumulative score.
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    score: Score,
    spawn: SpawnPolicy,
}

impl Game {
    /// Start a game on an empty `size`×`size` grid with score 0.
    pub fn new(size: usize, spawn: SpawnPolicy) -> Result<Self, EngineError> {
        Ok(Self::from_grid(Grid::new(size)?, spawn))
    }

    /// Resume from an existing grid. The score starts at 0.
    pub fn from_grid(grid: Grid, spawn: SpawnPolicy) -> Self {
        Game {
            grid,
            score: 0,
            spawn,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    #[inline]
    pub fn spawn_policy(&self) -> SpawnPolicy {
        self.spawn
    }

    /// Slide/merge the owned grid toward `direction` and bank the merge score.
    ///
    /// Returns true if the grid changed.
    ///
    /// ```
    /// use slide_engine::engine::{Direction, Game, Grid, SpawnPolicy};
    /// let grid = Grid::from_rows(vec![vec![2, 2], vec![0, 0]]).unwrap();
    /// let mut game = Game::from_grid(grid, SpawnPolicy::default());
    /// assert!(game.apply_move(Direction::Right));
    /// assert_eq!(game.score(), 4);
    /// assert!(!game.apply_move(Direction::Right));
    /// ```
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        let outcome = ops::apply(&mut self.grid, direction);
        self.score = self.score.saturating_add(outcome.score_delta);
        debug!(
            "move {:?}: changed={} delta={} score={}",
            direction, outcome.changed, outcome.score_delta, self.score
        );
        outcome.changed
    }

    /// True if no direction would change the grid. The owned grid is left as is.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        ops::is_terminal(&self.grid)
    }

    /// Place a 2 or 4 on a uniformly chosen empty cell, using the provided RNG.
    ///
    /// Returns the coordinate and value written, or `NoEmptySlot` on a full grid.
    ///
    /// ```
    /// use slide_engine::engine::{Game, SpawnPolicy};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let mut game = Game::new(2, SpawnPolicy::default()).unwrap();
    /// for _ in 0..4 {
    ///     game.spawn_tile(&mut rng).unwrap();
    /// }
    /// assert!(game.grid().is_full());
    /// assert!(game.spawn_tile(&mut rng).is_err());
    /// ```
    pub fn spawn_tile<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<((usize, usize), Tile), EngineError> {
        let empty = self.grid.empty_cells();
        if empty.is_empty() {
            return Err(EngineError::NoEmptySlot);
        }
        let (row, col) = empty[rng.gen_range(0..empty.len())];
        let value = self.spawn.draw(rng);
        self.grid.set(row, col, value);
        debug!("spawned {} at ({}, {})", value, row, col);
        Ok(((row, col), value))
    }
}
