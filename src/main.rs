use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use autosweeper::config::AppConfig;
use autosweeper::simulation;

/// Play batches of minesweeper with the heuristic solver.
#[derive(Parser)]
#[command(name = "autosweeper", about = "Heuristic minesweeper auto-player")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override board rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override board columns
    #[arg(long)]
    cols: Option<usize>,

    /// Override mine count
    #[arg(long)]
    mines: Option<usize>,

    /// Override number of games to play
    #[arg(long)]
    games: Option<usize>,

    /// Master seed for a reproducible batch
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(rows) = cli.rows {
        config.board.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.board.cols = cols;
    }
    if let Some(mines) = cli.mines {
        config.board.mines = mines;
    }
    if let Some(games) = cli.games {
        config.simulation.games = games;
    }
    if let Some(seed) = cli.seed {
        config.simulation.seed = Some(seed);
    }
    config.validate().context("validating configuration")?;

    println!(
        "Playing {} games on a {}x{} board with {} mines...",
        config.simulation.games, config.board.rows, config.board.cols, config.board.mines
    );

    let result =
        simulation::run_batch(&config.board, &config.simulation).context("running batch")?;

    println!(
        "wins: {}/{} ({:.1}%)",
        result.wins,
        result.games,
        result.win_rate * 100.0
    );
    println!(
        "avg moves: {:.1}, avg guesses: {:.1}",
        result.avg_moves, result.avg_guesses
    );
    println!("elapsed: {:.2?}", result.elapsed);
    Ok(())
}
