//! Entry points for presentation layers.
//!
//! A driver renders from [`Board::get`], turns user gestures into
//! [`request_move`] calls, and after each player move that leaves the game
//! [`GameOutcome::InProgress`] asks [`compute_automated_move`] for the reply.
//! Once an outcome other than `InProgress` comes back it stops issuing moves.

use crate::ai::Minimax;
use crate::error::{MoveError, SearchError};
use crate::game::{self, Board, GameOutcome, Side};

/// Fresh, empty board.
pub fn create_game() -> Board {
    Board::new()
}

/// Drop `side`'s piece into `col`. The input board is never modified; on
/// success the new board and the outcome for the mover are returned.
pub fn request_move(board: &Board, col: usize, side: Side) -> Result<(Board, GameOutcome), MoveError> {
    game::play(board, col, side)
}

/// The automated side's column at the default search depth. Blocks until the
/// search finishes.
pub fn compute_automated_move(board: &Board) -> Result<usize, SearchError> {
    compute_automated_move_with(board, &Minimax::default())
}

pub fn compute_automated_move_with(board: &Board, searcher: &Minimax) -> Result<usize, SearchError> {
    searcher.best_move(board).map(|best| best.column)
}
