//! Board representation and outcome detection.
//!
//! The board is a fixed array of 9 [`Cell`]s. The [`Outcome`] is never
//! stored: it is recomputed from the cells on every query by scanning the
//! 8 winning lines.

use std::fmt;

use crate::constants::{CELLS, LINES, N};

/// One of the two marks a player places on a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    /// First mover (the human by convention).
    X,
    /// Second mover (the automated player by convention).
    O,
}

impl Mark {
    /// The mark that always moves first after a reset.
    pub const FIRST: Mark = Mark::X;

    /// The mark played by search when automated play is enabled.
    pub const AUTOMATED: Mark = Mark::O;

    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    /// Parse a mark from `x`/`o` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Some(Mark::X),
            "o" => Some(Mark::O),
            _ => None,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Contents of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Marked(Mark),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Marked(m) => Some(m),
        }
    }
}

/// Derived game result.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    /// `mark` completed `line` (the first winning triple in check order).
    Win { mark: Mark, line: [usize; 3] },
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }

    /// The winning mark, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::Win { mark, .. } => Some(mark),
            _ => None,
        }
    }

    /// The winning line, if any.
    pub fn line(self) -> Option<[usize; 3]> {
        match self {
            Outcome::Win { line, .. } => Some(line),
            _ => None,
        }
    }
}

/// A 3x3 tic-tac-toe board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from a 9-character layout in row-major order.
    ///
    /// `X`/`x` and `O`/`o` are marks; `.`, `-`, and `_` are empty cells.
    /// Whitespace and `|` separators are ignored, so `"XX.|OO.|..."` works.
    /// Returns `None` if the layout does not describe exactly 9 cells.
    pub fn from_layout(layout: &str) -> Option<Self> {
        let mut cells = [Cell::Empty; CELLS];
        let mut i = 0;
        for ch in layout.chars() {
            let cell = match ch {
                'X' | 'x' => Cell::Marked(Mark::X),
                'O' | 'o' => Cell::Marked(Mark::O),
                '.' | '-' | '_' => Cell::Empty,
                '|' => continue,
                c if c.is_whitespace() => continue,
                _ => return None,
            };
            if i >= CELLS {
                return None;
            }
            cells[i] = cell;
            i += 1;
        }
        (i == CELLS).then_some(Self { cells })
    }

    /// Cell at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Whether `index` is on the board and empty.
    pub fn is_open(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Indices of empty cells in ascending order.
    pub fn available_moves(&self) -> Vec<usize> {
        (0..CELLS).filter(|&i| self.cells[i].is_empty()).collect()
    }

    /// Number of marks on the board.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Put `mark` on an empty in-range cell. Returns false otherwise.
    pub(crate) fn place(&mut self, index: usize, mark: Mark) -> bool {
        if !self.is_open(index) {
            return false;
        }
        self.cells[index] = Cell::Marked(mark);
        true
    }

    /// Return a copy of this board with `mark` placed at `index`.
    ///
    /// The caller guarantees that `index` is open.
    pub(crate) fn with_mark(&self, index: usize, mark: Mark) -> Self {
        let mut next = *self;
        next.cells[index] = Cell::Marked(mark);
        next
    }

    /// Compute the outcome from the current cells.
    pub fn outcome(&self) -> Outcome {
        for line in LINES {
            let [a, b, c] = line;
            if let Cell::Marked(mark) = self.cells[a] {
                if self.cells[b] == self.cells[a] && self.cells[c] == self.cells[a] {
                    return Outcome::Win { mark, line };
                }
            }
        }
        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..N {
            for col in 0..N {
                let ch = match self.cells[row * N + col] {
                    Cell::Marked(m) => m.symbol(),
                    Cell::Empty => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(layout: &str) -> Board {
        Board::from_layout(layout).unwrap()
    }

    #[test]
    fn test_empty_board_in_progress() {
        let b = Board::new();
        assert_eq!(b.outcome(), Outcome::InProgress);
        assert_eq!(b.available_moves(), (0..9).collect::<Vec<_>>());
        assert_eq!(b.count(), 0);
    }

    #[test]
    fn test_from_layout_separators() {
        let a = board("XX.OO....");
        let b = board("XX.|OO.|...");
        let c = board("X X -\nO O -\n- - -");
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.get(0), Some(Cell::Marked(Mark::X)));
        assert_eq!(a.get(3), Some(Cell::Marked(Mark::O)));
        assert_eq!(a.get(2), Some(Cell::Empty));
    }

    #[test]
    fn test_from_layout_rejects_bad_length() {
        assert!(Board::from_layout("XX").is_none());
        assert!(Board::from_layout("..........").is_none());
        assert!(Board::from_layout("XX.OO...Z").is_none());
    }

    #[test]
    fn test_win_each_line() {
        for line in LINES {
            let mut b = Board::new();
            for i in line {
                assert!(b.place(i, Mark::O));
            }
            assert_eq!(b.outcome(), Outcome::Win { mark: Mark::O, line });
        }
    }

    #[test]
    fn test_first_line_reported() {
        // Top row and left column both complete; rows are checked first.
        let b = board("XXX|X..|X..");
        assert_eq!(b.outcome().line(), Some([0, 1, 2]));
    }

    #[test]
    fn test_draw() {
        let b = board("OXO|XOX|XOX");
        assert_eq!(b.outcome(), Outcome::Draw);
        assert!(b.is_full());
    }

    #[test]
    fn test_win_on_full_board_is_win() {
        let b = board("XOX|OXO|OXX");
        assert_eq!(b.outcome().winner(), Some(Mark::X));
    }

    #[test]
    fn test_place_rejects_occupied_and_out_of_range() {
        let mut b = Board::new();
        assert!(b.place(4, Mark::X));
        assert!(!b.place(4, Mark::O));
        assert!(!b.place(9, Mark::O));
        assert_eq!(b.get(4), Some(Cell::Marked(Mark::X)));
        assert_eq!(b.get(9), None);
    }

    #[test]
    fn test_with_mark_copies() {
        let b = Board::new();
        let next = b.with_mark(0, Mark::X);
        assert!(b.is_open(0));
        assert!(!next.is_open(0));
    }

    #[test]
    fn test_display() {
        let b = board("X..|.O.|...");
        assert_eq!(b.to_string(), "X . . \n. O . \n. . . \n");
    }

    #[test]
    fn test_mark_parse() {
        assert_eq!(Mark::parse("X"), Some(Mark::X));
        assert_eq!(Mark::parse("o"), Some(Mark::O));
        assert_eq!(Mark::parse("z"), None);
        assert_eq!(Mark::X.opponent(), Mark::O);
    }
}
