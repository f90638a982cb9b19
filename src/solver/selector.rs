use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::EngineError;
use crate::game::MineField;

use super::estimator::ProbabilityEstimator;

/// One action performed on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Flagged a certain mine.
    Mark { row: usize, col: usize },
    /// Revealed a proven-safe cell.
    Reveal { row: usize, col: usize },
    /// Revealed the least likely cell without certainty.
    Guess { row: usize, col: usize },
}

/// Turns the probability grid into one action per call.
///
/// Certain moves take precedence: the first hidden unmarked cell proven to be
/// a mine is marked; failing that, the first proven safe one is revealed.
/// With no certainty left and the field not yet won, the selector guesses:
/// a random hidden unmarked cell seeds the candidate, then a row-major scan
/// replaces it with the first cell at each new probability minimum below the
/// 0.5 prior. The random seed only matters on fields where no estimate beats
/// the prior, such as the opening move.
pub struct MoveSelector {
    estimator: ProbabilityEstimator,
    rng: StdRng,
}

impl MoveSelector {
    /// Selector sized to a field, with an OS-seeded rng.
    pub fn new<F: MineField>(field: &F) -> Result<Self, EngineError> {
        Ok(MoveSelector {
            estimator: ProbabilityEstimator::new(field.rows(), field.cols())?,
            rng: StdRng::from_os_rng(),
        })
    }

    /// Selector with a fixed seed for reproducible guesses.
    pub fn with_seed<F: MineField>(field: &F, seed: u64) -> Result<Self, EngineError> {
        Ok(MoveSelector {
            estimator: ProbabilityEstimator::new(field.rows(), field.cols())?,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Recompute probabilities and perform the next action on the field.
    ///
    /// Returns `None` without acting when the field reports won, or when no
    /// hidden unmarked cell remains to act on.
    pub fn next_move<F: MineField>(&mut self, field: &mut F) -> Option<Move> {
        let rows = field.rows();
        let cols = field.cols();
        self.estimator.recompute(field);

        // Certain mines first: a mark can satisfy constraints elsewhere and
        // unlock safe reveals on the next call.
        for row in 0..rows {
            for col in 0..cols {
                if hidden(field, row, col) && self.estimator.grid().get(row, col) == 1.0 {
                    field.mark(row, col);
                    return Some(Move::Mark { row, col });
                }
            }
        }

        for row in 0..rows {
            for col in 0..cols {
                if hidden(field, row, col) && self.estimator.grid().get(row, col) == 0.0 {
                    field.reveal(row, col);
                    return Some(Move::Reveal { row, col });
                }
            }
        }

        if field.is_won() {
            return None;
        }

        // Fallback guess. The random candidate keeps a constraint-free field
        // (every cell at the prior) playable; any estimate below 0.5 replaces
        // it deterministically, first cell per new minimum.
        let mut candidates = Vec::new();
        for row in 0..rows {
            for col in 0..cols {
                if hidden(field, row, col) {
                    candidates.push((row, col));
                }
            }
        }
        if candidates.is_empty() {
            return None;
        }
        let (mut best_row, mut best_col) = candidates[self.rng.random_range(0..candidates.len())];
        let mut best = 0.5;
        for row in 0..rows {
            for col in 0..cols {
                let p = self.estimator.grid().get(row, col);
                if p >= 0.0 && p < best {
                    best = p;
                    best_row = row;
                    best_col = col;
                }
            }
        }
        field.reveal(best_row, best_col);
        Some(Move::Guess {
            row: best_row,
            col: best_col,
        })
    }
}

fn hidden<F: MineField>(field: &F, row: usize, col: usize) -> bool {
    !field.is_revealed(row, col) && !field.is_marked(row, col)
}
