use crate::game::{Board, Cell, Window, CENTER_COL, COLS, ROWS, WINDOW_LEN};

pub const FOUR_WEIGHT: i64 = 100;
pub const THREE_WEIGHT: i64 = 5;
pub const TWO_WEIGHT: i64 = 2;
/// Opponent one drop away from completing a window.
pub const OPPONENT_THREE_WEIGHT: i64 = -4;
/// Per own piece in the middle column.
pub const CENTER_WEIGHT: i64 = 3;

const SPAN: usize = WINDOW_LEN - 1;
const WINDOW_COUNT: usize =
    ROWS * (COLS - SPAN) + (ROWS - SPAN) * COLS + 2 * (ROWS - SPAN) * (COLS - SPAN);

/// Upper bound on `|score_position|` for any board.
pub const MAX_HEURISTIC_MAGNITUDE: i64 =
    WINDOW_COUNT as i64 * FOUR_WEIGHT + ROWS as i64 * CENTER_WEIGHT;

/// Trait for evaluating a non-terminal board from one piece's perspective.
pub trait Heuristic: Send + Sync {
    fn evaluate(&self, board: &Board, piece: Cell) -> i64;
}

/// Default heuristic: fixed window weights plus a center-column bonus.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowHeuristic;

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, board: &Board, piece: Cell) -> i64 {
        score_position(board, piece)
    }
}

/// Score one window for `piece`. At most one weight applies per window.
pub fn evaluate_window(window: &Window, piece: Cell) -> i64 {
    let count = |target: Cell| window.iter().filter(|&&cell| cell == target).count();
    let own = count(piece);
    let opp = count(piece.opponent());
    let empty = count(Cell::Empty);

    if own == 4 {
        FOUR_WEIGHT
    } else if own == 3 && empty == 1 {
        THREE_WEIGHT
    } else if own == 2 && empty == 2 {
        TWO_WEIGHT
    } else if opp == 3 && empty == 1 {
        OPPONENT_THREE_WEIGHT
    } else {
        0
    }
}

/// Positional score of `board` for `piece`.
///
/// Sums [`evaluate_window`] over every horizontal, vertical and diagonal
/// window and adds [`CENTER_WEIGHT`] for each `piece` in the middle column.
/// Wins and losses are not special-cased here; the search scores terminal
/// boards itself.
pub fn score_position(board: &Board, piece: Cell) -> i64 {
    let center = (0..ROWS)
        .filter(|&row| board.get(row, CENTER_COL) == piece)
        .count() as i64;

    let windows: i64 = board
        .windows()
        .map(|window| evaluate_window(&window, piece))
        .sum();

    center * CENTER_WEIGHT + windows
}
