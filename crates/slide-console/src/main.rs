mod config;
mod input;
mod render;
mod session;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use env_logger::Env;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slide_engine::engine::{Game, SpawnPolicy};

use config::Config;
use input::{Input, KeyMap};
use render::Renderer;
use session::{Control, Session, Turn};

#[derive(Parser, Debug)]
#[command(name = "slide2048", about = "Slide and merge tiles until no move is left.")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    config: Option<PathBuf>,

    /// Seed for tile placement (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Grid dimension (overrides the config file)
    #[arg(long)]
    size: Option<usize>,

    /// Log filter used when RUST_LOG is unset, e.g. "info", "debug".
    #[arg(long, default_value = "warn")]
    log: String,
}

/// Keeps the terminal in raw mode for as long as it lives.
struct RawMode;

impl RawMode {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw terminal mode")?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_toml(path)?,
        None => Config::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(size) = args.size {
        config.size = size;
    }
    config.validate()?;
    Ok(config)
}

fn read_input(keymap: &KeyMap) -> Result<Input> {
    match event::read().context("failed to read terminal event")? {
        Event::Key(key) => Ok(keymap.translate(key)),
        // Resizes and the like just trigger a redraw.
        _ => Ok(Input::Ignored),
    }
}

fn wait_for_key() -> Result<()> {
    loop {
        if let Event::Key(key) = event::read().context("failed to read terminal event")? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

fn run<R: Rng, W: Write>(
    session: &mut Session<R>,
    renderer: &Renderer,
    keymap: &KeyMap,
    out: &mut W,
) -> Result<()> {
    loop {
        let turn = session
            .begin_turn()
            .context("turn started without an empty cell")?;
        renderer.draw(out, session.game())?;
        if turn == Turn::Lost {
            renderer.announce_loss(out)?;
            return wait_for_key();
        }
        renderer.prompt(out)?;
        if session.handle(read_input(keymap)?) == Control::Quit {
            return Ok(());
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log.as_str())).init();

    let config = load_config(&args)?;
    let spawn = SpawnPolicy::new(config.spawn.four_probability)?;
    let game = Game::new(config.size, spawn)?;
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(
        "starting {0}x{0} game (seed: {1:?}, four probability: {2})",
        config.size,
        config.seed,
        spawn.four_probability()
    );

    let keymap = KeyMap::new(&config.keys);
    let renderer = Renderer::new(&config.display);
    let mut session = Session::new(game, rng);

    let result = {
        let _raw = RawMode::enable()?;
        let mut stdout = io::stdout().lock();
        run(&mut session, &renderer, &keymap, &mut stdout)
    };

    info!(
        "final score {} after {} moves, highest tile {}",
        session.game().score(),
        session.moves(),
        session.game().grid().highest_tile()
    );
    result
}
