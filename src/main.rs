use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Target;
use log::{info, LevelFilter};

use snake_events::config::{GameConfig, GameMode};
use snake_events::error::ConfigError;
use snake_events::game::SnakeGame;
use snake_events::term::TermManager;

#[derive(Parser)]
#[command(name = "snake-events")]
#[command(version, about = "Message-driven Snake for one or two players")]
struct Cli {
    /// Number of players (1 or 2)
    #[arg(long, short, default_value = "1")]
    players: u8,

    /// Grid width in cells (default: fit the terminal)
    #[arg(long)]
    width: Option<i32>,

    /// Grid height in cells (default: fit the terminal)
    #[arg(long)]
    height: Option<i32>,

    /// Steps per second before the speed-up
    #[arg(long, default_value = "10")]
    fps: u32,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (logging is off without it)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_file.as_deref())?;

    let term = TermManager::new().context("failed to query the terminal")?;
    let config = build_config(&cli, &term)?;
    info!("starting with {:?}", config);

    let mut game = SnakeGame::new(config, term);
    game.run()
}

fn build_config(cli: &Cli, term: &TermManager) -> Result<GameConfig> {
    let (max_width, max_height) = term.grid_capacity();
    let width = cli.width.unwrap_or(max_width);
    let height = cli.height.unwrap_or(max_height);

    if width > max_width || height > max_height {
        let (cols, rows) = term.get_terminal_size();
        return Err(ConfigError::TerminalTooSmall { cols, rows, width, height }.into());
    }

    let config = GameConfig {
        base_fps: cli.fps,
        seed: cli.seed,
        ..GameConfig::new(width, height, GameMode::from_players(cli.players)?)
    };
    config.validate()?;
    Ok(config)
}

/// The game owns the terminal, so logs only go to a file. Without one,
/// logging is off; `RUST_LOG` tunes the level of the file log.
fn init_logger(log_file: Option<&Path>) -> Result<()> {
    logger_builder(log_file)?.init();
    Ok(())
}

fn logger_builder(log_file: Option<&Path>) -> Result<env_logger::Builder> {
    let mut builder = env_logger::Builder::new();

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder
                .filter_level(LevelFilter::Info)
                .target(Target::Pipe(Box::new(file)))
                .parse_default_env();
        }
        None => {
            builder.filter_level(LevelFilter::Off);
        }
    }

    Ok(builder)
}
