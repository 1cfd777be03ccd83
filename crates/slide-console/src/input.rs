use std::collections::{BTreeMap, HashMap};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::warn;
use slide_engine::engine::Direction;

/// What a single key press means to the turn loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Move(Direction),
    Quit,
    /// Any key that is neither a direction nor a quit request.
    Ignored,
}

/// Arrow keys plus configurable letter aliases.
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    letters: HashMap<char, Direction>,
}

impl KeyMap {
    /// Build from validated config bindings; keys that are not a single
    /// character are skipped.
    pub fn new(bindings: &BTreeMap<String, Direction>) -> Self {
        let letters = bindings
            .iter()
            .filter_map(|(key, &dir)| {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some((c.to_ascii_lowercase(), dir)),
                    _ => {
                        warn!("ignoring key binding {key:?}: not a single character");
                        None
                    }
                }
            })
            .collect();
        KeyMap { letters }
    }

    pub fn translate(&self, key: KeyEvent) -> Input {
        if key.kind == KeyEventKind::Release {
            return Input::Ignored;
        }
        match key.code {
            KeyCode::Up => Input::Move(Direction::Up),
            KeyCode::Down => Input::Move(Direction::Down),
            KeyCode::Left => Input::Move(Direction::Left),
            KeyCode::Right => Input::Move(Direction::Right),
            KeyCode::Esc => Input::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Input::Quit,
            KeyCode::Char(c) => match self.letters.get(&c.to_ascii_lowercase()) {
                Some(&dir) => Input::Move(dir),
                None if c == 'q' => Input::Quit,
                None => Input::Ignored,
            },
            _ => Input::Ignored,
        }
    }
}
