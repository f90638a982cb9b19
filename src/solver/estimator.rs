use crate::error::EngineError;
use crate::game::MineField;

/// Sentinel for cells excluded from consideration (revealed cells are neither
/// mark nor reveal candidates).
pub const IGNORED: f64 = -1.0;

/// Prior for a hidden cell no constraint has touched yet.
const UNKNOWN: f64 = 0.5;

/// Per-cell estimated mine probability, same extents as the field.
///
/// Values are in `[0, 1]`, or [`IGNORED`] for revealed cells. A value of
/// exactly 0 or 1 is proven by some constraint; anything strictly in between
/// is an estimate.
#[derive(Debug, Clone)]
pub struct ProbabilityGrid {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl ProbabilityGrid {
    fn new(rows: usize, cols: usize) -> Self {
        ProbabilityGrid {
            rows,
            cols,
            values: vec![UNKNOWN; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    fn set(&mut self, row: usize, col: usize, p: f64) {
        self.values[row * self.cols + col] = p;
    }

    fn reset(&mut self) {
        self.values.fill(UNKNOWN);
    }
}

/// Derives mine probabilities from the constraints of revealed cells.
///
/// Each call to [`recompute`](ProbabilityEstimator::recompute) rebuilds the
/// grid from scratch; no state is carried between calls. Constraints are
/// applied per revealed cell in row-major order:
///
/// - a satisfied cell (marked neighbors account for its whole count) proves
///   its remaining hidden neighbors safe, overriding any earlier estimate;
/// - a cell whose count meets or exceeds its hidden-neighbor total proves
///   those neighbors to be mines;
/// - otherwise each still-undetermined hidden neighbor gets the local ratio
///   of remaining mines to hidden slots, rounded to two decimals.
///
/// When several constraints bound the same hidden cell, the ratio written by
/// the constraint scanned last wins; estimates are never merged, which is a
/// known accuracy gap versus a true combination of overlapping constraints.
/// Proven values (0 or 1) are final for the rest of the pass: the ratio
/// branch only touches cells still strictly between 0 and 1.
pub struct ProbabilityEstimator {
    grid: ProbabilityGrid,
}

impl ProbabilityEstimator {
    /// Estimator sized to a field. Rejects empty extents.
    pub fn new(rows: usize, cols: usize) -> Result<Self, EngineError> {
        if rows == 0 || cols == 0 {
            return Err(EngineError::EmptyField { rows, cols });
        }
        Ok(ProbabilityEstimator {
            grid: ProbabilityGrid::new(rows, cols),
        })
    }

    pub fn grid(&self) -> &ProbabilityGrid {
        &self.grid
    }

    /// Rebuild the probability grid from the field's current state.
    pub fn recompute<F: MineField>(&mut self, field: &F) -> &ProbabilityGrid {
        debug_assert_eq!(field.rows(), self.grid.rows);
        debug_assert_eq!(field.cols(), self.grid.cols);

        self.grid.reset();
        for row in 0..self.grid.rows {
            for col in 0..self.grid.cols {
                if !field.is_revealed(row, col) {
                    continue;
                }
                self.grid.set(row, col, IGNORED);

                let hidden = field.hidden_neighbors(row, col);
                if field.is_satisfied(row, col) {
                    // Every remaining hidden neighbor is proven safe.
                    for (nr, nc) in hidden {
                        self.grid.set(nr, nc, 0.0);
                    }
                    continue;
                }

                let count = field.adjacent_mines(row, col) as usize;
                let flagged = field.marked_neighbors(row, col).len();
                for &(nr, nc) in &hidden {
                    let current = self.grid.get(nr, nc);
                    if current <= 0.0 || current >= 1.0 {
                        continue;
                    }
                    if count >= hidden.len() {
                        self.grid.set(nr, nc, 1.0);
                    } else {
                        let ratio = (count as f64 - flagged as f64) / hidden.len() as f64;
                        self.grid.set(nr, nc, round2(ratio));
                    }
                }
            }
        }
        &self.grid
    }
}

fn round2(p: f64) -> f64 {
    (p * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Board;

    fn recomputed(board: &Board) -> ProbabilityGrid {
        let mut estimator = ProbabilityEstimator::new(3, 3).unwrap();
        estimator.recompute(board);
        estimator.grid().clone()
    }

    #[test]
    fn test_rejects_empty_field() {
        assert!(ProbabilityEstimator::new(0, 5).is_err());
        assert!(ProbabilityEstimator::new(5, 0).is_err());
    }

    #[test]
    fn test_untouched_field_is_all_priors() {
        let board = Board::with_mines(3, 3, &[(0, 0)]).unwrap();
        let grid = recomputed(&board);
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(grid.get(row, col), 0.5);
            }
        }
    }

    #[test]
    fn test_revealed_cells_are_ignored() {
        let mut board = Board::with_mines(3, 3, &[(0, 0)]).unwrap();
        board.reveal(1, 1);
        board.reveal(2, 2);
        let grid = recomputed(&board);
        assert_eq!(grid.get(1, 1), IGNORED);
        assert_eq!(grid.get(2, 2), IGNORED);
    }

    #[test]
    fn test_satisfied_cell_proves_neighbors_safe() {
        let mut board = Board::with_mines(3, 3, &[(0, 0)]).unwrap();
        board.reveal(1, 1);
        board.mark(0, 0);
        let grid = recomputed(&board);
        // Every hidden unmarked neighbor of the satisfied center is safe.
        for &(row, col) in &[(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)] {
            assert_eq!(grid.get(row, col), 0.0, "({row}, {col})");
        }
        // The marked cell itself is never written.
        assert_eq!(grid.get(0, 0), 0.5);
    }

    #[test]
    fn test_count_matching_hidden_neighbors_proves_mines() {
        let mut board = Board::with_mines(1, 3, &[(0, 0), (0, 2)]).unwrap();
        board.reveal(0, 1);
        let mut estimator = ProbabilityEstimator::new(1, 3).unwrap();
        let grid = estimator.recompute(&board);
        assert_eq!(grid.get(0, 0), 1.0);
        assert_eq!(grid.get(0, 2), 1.0);
        assert_eq!(grid.get(0, 1), IGNORED);
    }

    #[test]
    fn test_ratio_is_rounded_to_two_decimals() {
        let mut board = Board::with_mines(3, 3, &[(1, 1)]).unwrap();
        board.reveal(2, 2);
        let grid = recomputed(&board);
        // One mine over three hidden neighbors.
        assert_eq!(grid.get(1, 1), 0.33);
        assert_eq!(grid.get(1, 2), 0.33);
        assert_eq!(grid.get(2, 1), 0.33);
    }

    #[test]
    fn test_marks_reduce_the_ratio_numerator() {
        let mut board = Board::with_mines(3, 3, &[(0, 0), (2, 2)]).unwrap();
        board.mark(0, 0);
        board.reveal(0, 1);
        board.reveal(1, 1);
        let grid = recomputed(&board);
        // (0, 1) is satisfied by the mark and proves its hidden neighbors
        // safe; those zeros survive the later unsatisfied constraint at
        // (1, 1), whose ratio discounts the flagged mine: (2 - 1) / 6 over
        // its six hidden neighbors, written only to the undetermined three.
        assert_eq!(grid.get(0, 2), 0.0);
        assert_eq!(grid.get(1, 0), 0.0);
        assert_eq!(grid.get(1, 2), 0.0);
        assert_eq!(grid.get(2, 0), 0.17);
        assert_eq!(grid.get(2, 1), 0.17);
        assert_eq!(grid.get(2, 2), 0.17);
    }

    #[test]
    fn test_last_constraint_wins_overlapping_estimates() {
        let mut board = Board::with_mines(3, 3, &[(2, 0), (2, 2)]).unwrap();
        board.reveal(1, 0);
        board.reveal(1, 1);
        let grid = recomputed(&board);
        // (1, 0) writes 1/4 = 0.25 to its hidden neighbors; (1, 1) is
        // scanned later and overwrites the shared ones with 2/7 = 0.29.
        // Estimates are not merged.
        assert_eq!(grid.get(0, 0), 0.29);
        assert_eq!(grid.get(2, 1), 0.29);
        assert_eq!(grid.get(1, 2), 0.29);
    }

    #[test]
    fn test_proven_safety_survives_later_constraints() {
        let mut board = Board::with_mines(3, 3, &[(0, 0), (2, 2)]).unwrap();
        board.mark(2, 2);
        board.reveal(1, 0);
        board.reveal(2, 1);
        let grid = recomputed(&board);
        // (1, 0) writes ratio estimates first; the satisfied (2, 1) then
        // proves (1, 1) and (2, 0) safe. A zero, once written, is final.
        assert_eq!(grid.get(1, 1), 0.0);
        assert_eq!(grid.get(2, 0), 0.0);
        assert_eq!(grid.get(0, 0), 0.25);
        assert_eq!(grid.get(0, 1), 0.25);
    }

    #[test]
    fn test_recompute_discards_stale_state() {
        let mut board = Board::with_mines(1, 3, &[(0, 0), (0, 2)]).unwrap();
        board.reveal(0, 1);
        let mut estimator = ProbabilityEstimator::new(1, 3).unwrap();
        estimator.recompute(&board);
        assert_eq!(estimator.grid().get(0, 0), 1.0);

        // Marking both mines satisfies the constraint; the old certainties
        // must not leak into the next pass.
        board.mark(0, 0);
        board.mark(0, 2);
        estimator.recompute(&board);
        assert_eq!(estimator.grid().get(0, 0), 0.5);
        assert_eq!(estimator.grid().get(0, 2), 0.5);
    }
}
