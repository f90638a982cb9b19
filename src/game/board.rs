use std::fmt;

use rand::Rng;

use crate::error::BoardError;

use super::field::MineField;

#[derive(Debug, Clone, Copy, Default)]
struct Cell {
    mine: bool,
    revealed: bool,
    marked: bool,
    adjacent: u8,
}

/// A rectangular minesweeper board.
///
/// The board owns all cell state. Revealing a mine latches the board into a
/// lost state; revealing a zero-count cell flood-reveals its neighborhood.
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    exploded: bool,
}

impl Board {
    /// Create a board with `mines` mines placed uniformly at random.
    pub fn generate<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        mines: usize,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::EmptyBoard);
        }
        if mines >= rows * cols {
            return Err(BoardError::TooManyMines { mines, rows, cols });
        }

        let mut board = Board::blank(rows, cols);
        for i in rand::seq::index::sample(rng, rows * cols, mines) {
            board.cells[i].mine = true;
        }
        board.count_adjacent();
        Ok(board)
    }

    /// Create a board with a fixed mine layout.
    pub fn with_mines(rows: usize, cols: usize, mines: &[(usize, usize)]) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::EmptyBoard);
        }
        if mines.len() >= rows * cols {
            return Err(BoardError::TooManyMines {
                mines: mines.len(),
                rows,
                cols,
            });
        }

        let mut board = Board::blank(rows, cols);
        for &(row, col) in mines {
            if row >= rows || col >= cols {
                return Err(BoardError::MineOutOfBounds {
                    row,
                    col,
                    rows,
                    cols,
                });
            }
            let i = row * cols + col;
            if board.cells[i].mine {
                return Err(BoardError::DuplicateMine { row, col });
            }
            board.cells[i].mine = true;
        }
        board.count_adjacent();
        Ok(board)
    }

    fn blank(rows: usize, cols: usize) -> Self {
        Board {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
            exploded: false,
        }
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    fn neighbor_positions(
        rows: usize,
        cols: usize,
        row: usize,
        col: usize,
    ) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(8);
        for dr in -1i32..=1 {
            for dc in -1i32..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let nr = row as i32 + dr;
                let nc = col as i32 + dc;
                if nr >= 0 && nc >= 0 && (nr as usize) < rows && (nc as usize) < cols {
                    out.push((nr as usize, nc as usize));
                }
            }
        }
        out
    }

    fn count_adjacent(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let count = Self::neighbor_positions(self.rows, self.cols, row, col)
                    .into_iter()
                    .filter(|&(nr, nc)| self.cells[nr * self.cols + nc].mine)
                    .count();
                self.cells[row * self.cols + col].adjacent = count as u8;
            }
        }
    }

    pub fn is_mine(&self, row: usize, col: usize) -> bool {
        self.cells[self.idx(row, col)].mine
    }

    pub fn mine_count(&self) -> usize {
        self.cells.iter().filter(|c| c.mine).count()
    }

    /// Whether a mine has been revealed.
    pub fn is_lost(&self) -> bool {
        self.exploded
    }

    /// Reveal a cell. No-op on revealed or marked cells. Revealing a mine
    /// latches the lost state; revealing a zero-count cell flood-reveals
    /// outward, skipping marked cells.
    pub fn reveal(&mut self, row: usize, col: usize) {
        let i = self.idx(row, col);
        if self.cells[i].revealed || self.cells[i].marked {
            return;
        }
        if self.cells[i].mine {
            self.cells[i].revealed = true;
            self.exploded = true;
            return;
        }

        let mut stack = vec![(row, col)];
        while let Some((r, c)) = stack.pop() {
            let i = self.idx(r, c);
            if self.cells[i].revealed || self.cells[i].marked {
                continue;
            }
            self.cells[i].revealed = true;
            if self.cells[i].adjacent == 0 {
                // Neighbors of a zero-count cell are never mines.
                for (nr, nc) in Self::neighbor_positions(self.rows, self.cols, r, c) {
                    let ni = nr * self.cols + nc;
                    if !self.cells[ni].revealed && !self.cells[ni].marked {
                        stack.push((nr, nc));
                    }
                }
            }
        }
    }

    /// Flag a hidden cell as a suspected mine. No-op on revealed cells.
    pub fn mark(&mut self, row: usize, col: usize) {
        let i = self.idx(row, col);
        if !self.cells[i].revealed {
            self.cells[i].marked = true;
        }
    }
}

impl MineField for Board {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn is_revealed(&self, row: usize, col: usize) -> bool {
        self.cells[self.idx(row, col)].revealed
    }

    fn is_marked(&self, row: usize, col: usize) -> bool {
        self.cells[self.idx(row, col)].marked
    }

    fn adjacent_mines(&self, row: usize, col: usize) -> u8 {
        self.cells[self.idx(row, col)].adjacent
    }

    fn is_won(&self) -> bool {
        !self.exploded
            && self
                .cells
                .iter()
                .all(|c| if c.mine { c.marked } else { c.revealed })
    }

    fn reveal(&mut self, row: usize, col: usize) {
        Board::reveal(self, row, col);
    }

    fn mark(&mut self, row: usize, col: usize) {
        Board::mark(self, row, col);
    }
}

impl fmt::Display for Board {
    /// Player view: `.` hidden, `F` marked, `*` revealed mine, digits otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = &self.cells[row * self.cols + col];
                let ch = if cell.marked {
                    'F'
                } else if !cell.revealed {
                    '.'
                } else if cell.mine {
                    '*'
                } else {
                    (b'0' + cell.adjacent) as char
                };
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
