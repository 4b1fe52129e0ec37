use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use arrayvec::ArrayVec;

use super::state::GameOutcome;
use crate::error::ParseBoardError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
/// Number of collinear cells needed to win, and the length of a scored window.
pub const WINDOW_LEN: usize = 4;
pub const CENTER_COL: usize = COLS / 2;

/// Four collinear cells, read in board order along one [`Direction`].
pub type Window = [Cell; WINDOW_LEN];

/// Open columns in ascending order.
pub type ValidLocations = ArrayVec<usize, COLS>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Player,
    Automated,
}

impl Cell {
    /// The other piece kind. `Empty` has no opponent and maps to itself.
    pub fn opponent(self) -> Cell {
        match self {
            Cell::Player => Cell::Automated,
            Cell::Automated => Cell::Player,
            Cell::Empty => Cell::Empty,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Player => 'X',
            Cell::Automated => 'O',
        }
    }

    fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::Player),
            'O' | 'o' => Some(Cell::Automated),
            _ => None,
        }
    }
}

/// The four line orientations a window can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Bottom-left to top-right (/)
    DiagonalUp,
    /// Top-left to bottom-right (\)
    DiagonalDown,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalUp,
        Direction::DiagonalDown,
    ];

    /// (row step, column step) between consecutive cells of a window.
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalUp => (1, 1),
            Direction::DiagonalDown => (-1, 1),
        }
    }

    /// Rows and columns a window may start from without leaving the board.
    fn starts(self) -> (Range<usize>, Range<usize>) {
        let span = WINDOW_LEN - 1;
        match self {
            Direction::Horizontal => (0..ROWS, 0..COLS - span),
            Direction::Vertical => (0..ROWS - span, 0..COLS),
            Direction::DiagonalUp => (0..ROWS - span, 0..COLS - span),
            Direction::DiagonalDown => (span..ROWS, 0..COLS - span),
        }
    }
}

/// Gravity-fed grid. Row 0 is the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position.
    /// Row 0 is the bottom, row 5 is the top.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// True iff the top cell of `col` is still empty.
    ///
    /// # Panics
    ///
    /// Panics if `col` is not a board column.
    pub fn is_valid_location(&self, col: usize) -> bool {
        assert!(col < COLS, "column {col} out of range (0..{COLS})");
        self.cells[ROWS - 1][col] == Cell::Empty
    }

    /// Lowest empty row in `col`, or `None` if the column is full.
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        (0..ROWS).find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Return a copy of the board with `piece` placed at `(row, col)`.
    ///
    /// `row` must be the column's next open row; anything else would leave a
    /// floating piece.
    #[must_use]
    pub fn drop_piece(mut self, row: usize, col: usize, piece: Cell) -> Board {
        debug_assert_eq!(
            self.next_open_row(col),
            Some(row),
            "piece must land on the next open row of column {col}"
        );
        self.cells[row][col] = piece;
        self
    }

    /// Columns that still accept a piece, in ascending order.
    pub fn valid_locations(&self) -> ValidLocations {
        (0..COLS)
            .filter(|&col| self.is_valid_location(col))
            .collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells[ROWS - 1].iter().all(|&cell| cell != Cell::Empty)
    }

    /// True iff `piece` holds four contiguous cells in any direction.
    pub fn winning_move(&self, piece: Cell) -> bool {
        if piece == Cell::Empty {
            return false;
        }
        self.windows()
            .any(|window| window.iter().all(|&cell| cell == piece))
    }

    /// Either side has won, or no column is open.
    pub fn is_terminal(&self) -> bool {
        self.winning_move(Cell::Player)
            || self.winning_move(Cell::Automated)
            || self.valid_locations().is_empty()
    }

    /// Game outcome derived from the current cells.
    pub fn outcome(&self) -> GameOutcome {
        if self.winning_move(Cell::Player) {
            GameOutcome::PlayerWins
        } else if self.winning_move(Cell::Automated) {
            GameOutcome::AutomatedWins
        } else if self.is_full() {
            GameOutcome::Draw
        } else {
            GameOutcome::InProgress
        }
    }

    /// Number of non-empty cells.
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Every window on the board: horizontal, vertical, then both diagonals.
    pub fn windows(&self) -> impl Iterator<Item = Window> + '_ {
        Direction::ALL
            .into_iter()
            .flat_map(move |direction| self.windows_in(direction))
    }

    /// Every window lying along `direction`.
    pub fn windows_in(&self, direction: Direction) -> impl Iterator<Item = Window> + '_ {
        let (rows, cols) = direction.starts();
        let (dr, dc) = direction.step();
        rows.flat_map(move |row| {
            cols.clone().map(move |col| {
                let window: Window = std::array::from_fn(|i| {
                    let r = row.wrapping_add_signed(dr * i as isize);
                    let c = col.wrapping_add_signed(dc * i as isize);
                    self.cells[r][c]
                });
                window
            })
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the top row first: `.` empty, `X` player, `O` automated.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            let line: String = self.cells[row].iter().map(|cell| cell.symbol()).collect();
            if row == 0 {
                write!(f, "{line}")?;
            } else {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

/// Parses the [`Display`](fmt::Display) form. Blank lines and surrounding
/// whitespace are ignored.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() != ROWS {
            return Err(ParseBoardError::RowCount(lines.len()));
        }

        let mut board = Board::new();
        for (line_no, line) in lines.iter().enumerate() {
            let row = ROWS - 1 - line_no;
            let len = line.chars().count();
            if len != COLS {
                return Err(ParseBoardError::RowLength { line: line_no + 1, len });
            }
            for (col, symbol) in line.chars().enumerate() {
                board.cells[row][col] = Cell::from_symbol(symbol).ok_or(
                    ParseBoardError::UnknownSymbol {
                        symbol,
                        line: line_no + 1,
                    },
                )?;
            }
        }

        for col in 0..COLS {
            for row in 1..ROWS {
                if board.cells[row][col] != Cell::Empty && board.cells[row - 1][col] == Cell::Empty {
                    return Err(ParseBoardError::FloatingPiece { row, col });
                }
            }
        }

        Ok(board)
    }
}
