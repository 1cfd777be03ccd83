use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use slide_engine::engine::Direction;

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Config {
    /// Grid dimension (N for an N×N board).
    #[serde(default = "defaults::size")]
    pub size: usize,

    /// Seed for tile placement. Omit for a fresh game every run.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub spawn: Spawn,
    #[serde(default)]
    pub display: Display,
    /// Letter aliases for the arrow keys, e.g. `w = "Up"`.
    #[serde(default = "defaults::bindings")]
    pub keys: BTreeMap<String, Direction>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Spawn {
    /// Probability that a spawned tile is a 4 rather than a 2.
    #[serde(default = "defaults::four_probability")]
    pub four_probability: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Display {
    /// Columns reserved for each cell; values are right-aligned.
    #[serde(default = "defaults::cell_width")]
    pub cell_width: usize,
    /// Color tiles by value. Disable for terminals without color support.
    #[serde(default = "defaults::colors")]
    pub colors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: defaults::size(),
            seed: None,
            spawn: Spawn::default(),
            display: Display::default(),
            keys: defaults::bindings(),
        }
    }
}

impl Default for Spawn {
    fn default() -> Self {
        Self {
            four_probability: defaults::four_probability(),
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self {
            cell_width: defaults::cell_width(),
            colors: defaults::colors(),
        }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=defaults::MAX_SIZE).contains(&self.size) {
            bail!("size must be within 1..={}, got {}", defaults::MAX_SIZE, self.size);
        }
        let p = self.spawn.four_probability;
        if !(0.0..=1.0).contains(&p) {
            bail!("spawn.four_probability must be within [0, 1], got {p}");
        }
        if self.display.cell_width == 0 {
            bail!("display.cell_width must be at least 1");
        }
        for key in self.keys.keys() {
            if key.chars().count() != 1 {
                bail!("key binding {key:?} must be a single character");
            }
        }
        Ok(())
    }
}

mod defaults {
    use std::collections::BTreeMap;

    use slide_engine::engine::{Direction, SpawnPolicy};

    /// Largest board that still fits a terminal screen.
    pub const MAX_SIZE: usize = 64;

    pub fn size() -> usize { 4 }
    pub fn four_probability() -> f64 { SpawnPolicy::DEFAULT_FOUR_PROBABILITY }
    pub fn cell_width() -> usize { 6 }
    pub fn colors() -> bool { true }

    pub fn bindings() -> BTreeMap<String, Direction> {
        [
            ("w", Direction::Up),
            ("a", Direction::Left),
            ("s", Direction::Down),
            ("d", Direction::Right),
            ("k", Direction::Up),
            ("h", Direction::Left),
            ("j", Direction::Down),
            ("l", Direction::Right),
        ]
        .into_iter()
        .map(|(k, d)| (k.to_string(), d))
        .collect()
    }
}
