/// Universal interface between the solver and a mine field.
///
/// The solver never owns board state; it reads cells through these queries and
/// acts through [`reveal`](MineField::reveal) and [`mark`](MineField::mark),
/// which it only ever calls on hidden, unmarked cells. Implementations decide
/// what revealing actually does (flood fill, loss detection, and so on).
pub trait MineField {
    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    fn is_revealed(&self, row: usize, col: usize) -> bool;

    fn is_marked(&self, row: usize, col: usize) -> bool;

    /// Number of mines adjacent to this cell. Only meaningful once the cell
    /// is revealed.
    fn adjacent_mines(&self, row: usize, col: usize) -> u8;

    /// Whether the puzzle is fully resolved: every safe cell revealed and
    /// every mine marked.
    fn is_won(&self) -> bool;

    /// Reveal a hidden, unmarked cell.
    fn reveal(&mut self, row: usize, col: usize);

    /// Flag a hidden, unmarked cell as a suspected mine.
    fn mark(&mut self, row: usize, col: usize);

    /// All in-bounds neighbors of a cell, row-major.
    fn neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(8);
        for dr in -1i32..=1 {
            for dc in -1i32..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let nr = row as i32 + dr;
                let nc = col as i32 + dc;
                if nr >= 0 && nc >= 0 && (nr as usize) < self.rows() && (nc as usize) < self.cols()
                {
                    out.push((nr as usize, nc as usize));
                }
            }
        }
        out
    }

    /// Neighbors that are neither revealed nor marked.
    fn hidden_neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        self.neighbors(row, col)
            .into_iter()
            .filter(|&(r, c)| !self.is_revealed(r, c) && !self.is_marked(r, c))
            .collect()
    }

    /// Neighbors currently flagged as suspected mines.
    fn marked_neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        self.neighbors(row, col)
            .into_iter()
            .filter(|&(r, c)| self.is_marked(r, c))
            .collect()
    }

    /// A revealed cell is satisfied when its marked neighbors account for all
    /// of its adjacent mines.
    fn is_satisfied(&self, row: usize, col: usize) -> bool {
        self.marked_neighbors(row, col).len() == self.adjacent_mines(row, col) as usize
    }
}
