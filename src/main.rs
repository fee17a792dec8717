use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{Config, WriteLogger};
use wrap_snake::config::{GameConfig, THEME_EMERALD};
use wrap_snake::game::GameState;
use wrap_snake::input::{GameInput, InputHandler};
use wrap_snake::score::{JsonScoreStore, ScoreStore};
use wrap_snake::session::Session;
use wrap_snake::terminal_runtime::{install_panic_hook, TerminalSession};
use wrap_snake::ui::hud::HudInfo;

/// Frame pacing for input polling and redraws.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board edge length in cells.
    #[arg(long)]
    grid_size: Option<u16>,

    /// Tick interval in milliseconds (80-300, lower is faster).
    #[arg(long)]
    speed: Option<u64>,

    /// JSON config file with `grid_size` and/or `speed_ms`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// High score file; defaults to the platform data directory.
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Write a debug log to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        WriteLogger::init(LevelFilter::Debug, Config::default(), File::create(path)?)
            .map_err(io::Error::other)?;
    }

    let config = resolve_config(&cli).map_err(io::Error::other)?;
    info!(
        "starting with {0}x{0} board at {1} ms per tick",
        config.grid_size, config.speed_ms
    );

    let state = match cli.seed {
        Some(seed) => GameState::with_seed(config, seed),
        None => GameState::new(config),
    };
    let store = cli
        .scores
        .clone()
        .map_or_else(JsonScoreStore::at_default_path, JsonScoreStore::new);
    info!("high score file: {}", store.path().display());

    install_panic_hook();
    run(Session::new(state, config, store))
}

fn resolve_config(cli: &Cli) -> Result<GameConfig, wrap_snake::config::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };

    if let Some(grid_size) = cli.grid_size {
        config.grid_size = grid_size;
    }
    if let Some(speed) = cli.speed {
        config.speed_ms = speed;
    }

    config.validate()
}

fn run<S: ScoreStore>(mut session: Session<S>) -> io::Result<()> {
    let mut terminal = TerminalSession::enter()?;
    let mut input = InputHandler::new();

    loop {
        terminal.draw(
            &session.snapshot(),
            &HudInfo {
                high_score: session.high_score(),
                speed_ms: session.speed_ms(),
                theme: &THEME_EMERALD,
            },
        )?;

        if let Some(game_input) = input.poll_input(FRAME_INTERVAL)? {
            if game_input == GameInput::Quit {
                break;
            }

            session.handle_input(game_input, Instant::now());
        }

        session.update(Instant::now());
    }

    info!("quit with best score {}", session.high_score());
    Ok(())
}
