//! Batch self-play: plays N independent games with the solver and
//! aggregates outcomes.
//!
//! Every game gets its own board, solver, and rng, seeded from a master seed
//! so an explicit seed reproduces a whole batch exactly. Games are
//! independent, so the batch fans out across threads; nothing is shared
//! between workers.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::{BoardConfig, SimulationConfig};
use crate::error::BoardError;
use crate::game::{Board, MineField};
use crate::solver::{Move, MoveSelector};

/// Outcome of a single game.
#[derive(Debug, Clone, Copy)]
pub struct GameReport {
    pub won: bool,
    pub moves: usize,
    pub marks: usize,
    pub guesses: usize,
}

/// Aggregate results of a batch run.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub games: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub avg_moves: f64,
    pub avg_guesses: f64,
    pub elapsed: Duration,
}

/// Play one seeded game to completion on a freshly generated board.
pub fn play_game(board: &BoardConfig, seed: u64) -> Result<GameReport, BoardError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut field = Board::generate(board.rows, board.cols, board.mines, &mut rng)?;
    let mut selector =
        MoveSelector::with_seed(&field, rng.random()).expect("generated board has valid extents");

    let mut report = GameReport {
        won: false,
        moves: 0,
        marks: 0,
        guesses: 0,
    };
    while !field.is_lost() {
        match selector.next_move(&mut field) {
            Some(Move::Mark { .. }) => report.marks += 1,
            Some(Move::Guess { .. }) => report.guesses += 1,
            Some(Move::Reveal { .. }) => {}
            None => break,
        }
        report.moves += 1;
    }
    report.won = field.is_won();
    Ok(report)
}

/// Play the configured number of games in parallel and aggregate.
pub fn run_batch(
    board: &BoardConfig,
    sim: &SimulationConfig,
) -> Result<BatchResult, BoardError> {
    let start = Instant::now();
    let master = sim.seed.unwrap_or_else(|| rand::rng().random());

    let reports = (0..sim.games)
        .into_par_iter()
        .map(|i| play_game(board, master.wrapping_add(i as u64)))
        .collect::<Result<Vec<_>, _>>()?;

    let games = reports.len();
    let wins = reports.iter().filter(|r| r.won).count();
    let total_moves: usize = reports.iter().map(|r| r.moves).sum();
    let total_guesses: usize = reports.iter().map(|r| r.guesses).sum();
    let divisor = games.max(1) as f64;

    Ok(BatchResult {
        games,
        wins,
        win_rate: wins as f64 / divisor,
        avg_moves: total_moves as f64 / divisor,
        avg_guesses: total_guesses as f64 / divisor,
        elapsed: start.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beginner() -> BoardConfig {
        BoardConfig {
            rows: 9,
            cols: 9,
            mines: 10,
        }
    }

    #[test]
    fn test_play_game_runs_to_an_outcome() {
        let report = play_game(&beginner(), 3).unwrap();
        assert!(report.moves > 0);
        assert!(report.guesses > 0); // the opening move is always a guess
        assert!(report.marks <= 10);
    }

    #[test]
    fn test_play_game_is_deterministic_per_seed() {
        let a = play_game(&beginner(), 42).unwrap();
        let b = play_game(&beginner(), 42).unwrap();
        assert_eq!(a.won, b.won);
        assert_eq!(a.moves, b.moves);
        assert_eq!(a.guesses, b.guesses);
    }

    #[test]
    fn test_batch_is_deterministic_per_seed() {
        let sim = SimulationConfig {
            games: 25,
            seed: Some(7),
        };
        let a = run_batch(&beginner(), &sim).unwrap();
        let b = run_batch(&beginner(), &sim).unwrap();
        assert_eq!(a.games, 25);
        assert_eq!(a.wins, b.wins);
        assert_eq!(a.avg_moves, b.avg_moves);
    }

    #[test]
    fn test_batch_aggregates_are_consistent() {
        let sim = SimulationConfig {
            games: 50,
            seed: Some(123),
        };
        let result = run_batch(&beginner(), &sim).unwrap();
        assert_eq!(result.games, 50);
        assert!(result.wins <= result.games);
        assert!((0.0..=1.0).contains(&result.win_rate));
        assert!(result.avg_moves > 0.0);
    }

    #[test]
    fn test_solver_wins_games_on_a_sparse_board() {
        // Two mines on 9x9 is nearly always solvable without guessing past
        // the opening; the heuristic should clear most of these.
        let board = BoardConfig {
            rows: 9,
            cols: 9,
            mines: 2,
        };
        let sim = SimulationConfig {
            games: 20,
            seed: Some(99),
        };
        let result = run_batch(&board, &sim).unwrap();
        assert!(result.wins > 0);
    }

    #[test]
    fn test_invalid_board_config_errors() {
        let board = BoardConfig {
            rows: 2,
            cols: 2,
            mines: 4,
        };
        let sim = SimulationConfig {
            games: 1,
            seed: Some(0),
        };
        assert!(run_batch(&board, &sim).is_err());
    }
}
