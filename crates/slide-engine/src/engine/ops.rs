use super::grid::{Direction, Grid, MoveOutcome, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Rows,
    Cols,
}

/// Maps a direction onto (line, step) coordinates so a single routine can
/// process every direction.
///
/// `outer` selects the line (a row for `Rows`, a column for `Cols`).
/// `step` counts cells away from the wall tiles are pushed against, so
/// step 0 always sits on that wall and the destination search always walks
/// toward lower steps.
#[derive(Debug, Clone, Copy)]
struct Orientation {
    axis: Axis,
    toward_low: bool,
    size: usize,
}

impl Orientation {
    fn new(direction: Direction, size: usize) -> Self {
        let axis = match direction {
            Direction::Left | Direction::Right => Axis::Rows,
            Direction::Up | Direction::Down => Axis::Cols,
        };
        let toward_low = matches!(direction, Direction::Left | Direction::Up);
        Orientation {
            axis,
            toward_low,
            size,
        }
    }

    #[inline]
    fn cell(&self, outer: usize, step: usize) -> (usize, usize) {
        let inner = if self.toward_low {
            step
        } else {
            self.size - 1 - step
        };
        match self.axis {
            Axis::Rows => (outer, inner),
            Axis::Cols => (inner, outer),
        }
    }

    #[inline]
    fn get(&self, grid: &Grid, outer: usize, step: usize) -> Tile {
        let (row, col) = self.cell(outer, step);
        grid.get(row, col)
    }

    #[inline]
    fn set(&self, grid: &mut Grid, outer: usize, step: usize, value: Tile) {
        let (row, col) = self.cell(outer, step);
        grid.set(row, col, value);
    }
}

/// Slide/merge every line of `grid` toward `direction`, in place.
///
/// Returns whether any tile moved and the total value of merged tiles.
pub fn apply(grid: &mut Grid, direction: Direction) -> MoveOutcome {
    let orientation = Orientation::new(direction, grid.size());
    let mut outcome = MoveOutcome::default();
    for outer in 0..grid.size() {
        apply_line(grid, orientation, outer, &mut outcome);
    }
    outcome
}

fn apply_line(grid: &mut Grid, o: Orientation, outer: usize, outcome: &mut MoveOutcome) {
    // Step of the most recent merge product; it must not absorb another tile.
    let mut merged_at: Option<usize> = None;

    // Step 0 is against the wall and can never move.
    for step in 1..o.size {
        let value = o.get(grid, outer, step);
        if value == 0 {
            continue;
        }

        let mut dest = step;
        while dest > 0 && o.get(grid, outer, dest - 1) == 0 {
            dest -= 1;
        }

        // Two 2^63 tiles have no representable sum and stay apart.
        let merged = value
            .checked_mul(2)
            .filter(|_| dest > 0 && merged_at != Some(dest - 1))
            .filter(|_| o.get(grid, outer, dest - 1) == value);
        if let Some(merged) = merged {
            o.set(grid, outer, dest - 1, merged);
            o.set(grid, outer, step, 0);
            merged_at = Some(dest - 1);
            outcome.changed = true;
            outcome.score_delta = outcome.score_delta.saturating_add(merged);
        } else if dest != step {
            o.set(grid, outer, dest, value);
            o.set(grid, outer, step, 0);
            outcome.changed = true;
        }
    }
}

/// True if no direction changes the grid. Each attempt runs on a clone, so
/// `grid` is never touched.
pub fn is_terminal(grid: &Grid) -> bool {
    for direction in Direction::ALL {
        let mut scratch = grid.clone();
        if apply(&mut scratch, direction).changed {
            return false;
        }
    }
    true
}
