use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::ops;

/// Value held by a single cell. 0 is empty, otherwise a power of two >= 2.
pub type Tile = u64;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Every direction, in the order terminal detection tries them.
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Left,
        Direction::Right,
    ];
}

/// Result of one directional pass over a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// True if any tile slid or merged.
    pub changed: bool,
    /// Sum of the values produced by merges during the pass.
    pub score_delta: u64,
}

/// Square N×N board of tiles stored row-major.
///
/// The size is fixed at construction; moves and spawns mutate cells in place.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<Tile>,
}

impl Grid {
    /// All-empty grid of the given dimension.
    ///
    /// ```
    /// use slide_engine::engine::Grid;
    /// let g = Grid::new(4).unwrap();
    /// assert_eq!(g.count_empty(), 16);
    /// assert!(Grid::new(0).is_err());
    /// ```
    pub fn new(size: usize) -> Result<Self, EngineError> {
        Ok(Grid {
            size,
            cells: vec![0; cell_count(size)?],
        })
    }

    /// Build a grid from explicit rows, validating shape and tile values.
    ///
    /// ```
    /// use slide_engine::engine::Grid;
    /// let g = Grid::from_rows(vec![vec![2, 4], vec![4, 2]]).unwrap();
    /// assert_eq!(g.get(1, 0), 4);
    /// assert!(Grid::from_rows(vec![vec![3, 0], vec![0, 0]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, EngineError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(cell_count(size)?);
        for (row, line) in rows.into_iter().enumerate() {
            if line.len() != size {
                return Err(EngineError::NotSquare {
                    row,
                    len: line.len(),
                    expected: size,
                });
            }
            for (col, value) in line.into_iter().enumerate() {
                if value != 0 && (value == 1 || !value.is_power_of_two()) {
                    return Err(EngineError::InvalidTile { row, col, value });
                }
                cells.push(value);
            }
        }
        Ok(Grid { size, cells })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Value at (row, col). Panics if out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.cells[self.index(row, col)]
    }

    /// Overwrite the value at (row, col). Panics if out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Tile) {
        let idx = self.index(row, col);
        self.cells[idx] = value;
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.size && col < self.size,
            "cell ({row}, {col}) outside {0}x{0} grid",
            self.size
        );
        row * self.size + col
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Row-major copy of the cells as nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.rows().map(<[Tile]>::to_vec).collect()
    }

    /// Coordinates currently holding 0, in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == 0)
            .map(|(idx, _)| (idx / self.size, idx % self.size))
            .collect()
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// Sum of all tile values.
    pub fn sum(&self) -> u64 {
        self.cells.iter().sum()
    }

    /// Highest tile value on the board (0 when empty).
    pub fn highest_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Slide/merge tiles in `dir` in place. No randomness.
    ///
    /// ```
    /// use slide_engine::engine::{Direction, Grid};
    /// let mut g = Grid::from_rows(vec![vec![2, 2], vec![0, 4]]).unwrap();
    /// let out = g.apply(Direction::Left);
    /// assert!(out.changed);
    /// assert_eq!(out.score_delta, 4);
    /// assert_eq!(g.to_rows(), vec![vec![4, 0], vec![4, 0]]);
    /// ```
    #[inline]
    pub fn apply(&mut self, dir: Direction) -> MoveOutcome {
        ops::apply(self, dir)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("size", &self.size)
            .field("rows", &self.to_rows())
            .finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let cells: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

fn cell_count(size: usize) -> Result<usize, EngineError> {
    if size == 0 {
        return Err(EngineError::ZeroSize);
    }
    size.checked_mul(size).ok_or(EngineError::TooLarge(size))
}

fn format_val(val: Tile) -> String {
    match val {
        0 => format!("{:^7}", ""),
        x => format!("{:^7}", x),
    }
}
