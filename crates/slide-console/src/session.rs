use log::{debug, info};
use rand::Rng;
use slide_engine::engine::{EngineError, Game};

use crate::input::Input;

/// State of the board at the start of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// At least one direction changes the grid; wait for input.
    Awaiting,
    /// No direction changes the grid.
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Turn sequencing around a `Game`, independent of any terminal.
///
/// A tile is spawned at the start of the first turn and after every move
/// that changed the grid; terminal detection only runs after a spawn.
pub struct Session<R: Rng> {
    game: Game,
    rng: R,
    needs_spawn: bool,
    moves: u64,
}

impl<R: Rng> Session<R> {
    pub fn new(game: Game, rng: R) -> Self {
        Session {
            game,
            rng,
            needs_spawn: true,
            moves: 0,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Number of moves that changed the grid.
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// Spawn a tile if the previous move changed the grid, then report
    /// whether the game can continue.
    pub fn begin_turn(&mut self) -> Result<Turn, EngineError> {
        if !self.needs_spawn {
            return Ok(Turn::Awaiting);
        }
        self.needs_spawn = false;
        self.game.spawn_tile(&mut self.rng)?;
        if self.game.is_terminal() {
            info!(
                "no moves left after {} moves: score {}, highest tile {}",
                self.moves,
                self.game.score(),
                self.game.grid().highest_tile()
            );
            return Ok(Turn::Lost);
        }
        Ok(Turn::Awaiting)
    }

    pub fn handle(&mut self, input: Input) -> Control {
        match input {
            Input::Move(direction) => {
                self.needs_spawn = self.game.apply_move(direction);
                if self.needs_spawn {
                    self.moves += 1;
                } else {
                    debug!("{:?} does not change the grid", direction);
                }
                Control::Continue
            }
            Input::Ignored => {
                self.needs_spawn = false;
                Control::Continue
            }
            Input::Quit => Control::Quit,
        }
    }
}
