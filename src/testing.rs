//! Fixtures shared by unit tests.

use rand::Rng;

use crate::game::{Board, Side};

/// Alternating player/computer drops, player first, that fill the board
/// without four in a row for either side.
pub(crate) const DRAW_SEQUENCE: [usize; 42] = [
    0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 4, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 5,
    5, 5, 5, 5, 6, 6, 6, 6, 6, 6, 5,
];

/// Play up to `max_plies` random legal drops from an empty board, alternating
/// sides from the player. Stops early once the game is decided, so the result
/// may be terminal.
pub(crate) fn random_board<R: Rng>(rng: &mut R, max_plies: usize) -> Board {
    let plies = rng.random_range(0..=max_plies);
    let mut board = Board::new();
    let mut side = Side::Player;
    for _ in 0..plies {
        if board.is_terminal() {
            break;
        }
        let valid = board.valid_locations();
        let col = valid[rng.random_range(0..valid.len())];
        if let Some(row) = board.next_open_row(col) {
            board = board.drop_piece(row, col, side.piece());
        }
        side = side.other();
    }
    board
}

/// Like [`random_board`], but retries until the board is still in play.
pub(crate) fn random_midgame_board<R: Rng>(rng: &mut R, max_plies: usize) -> Board {
    loop {
        let board = random_board(rng, max_plies);
        if !board.is_terminal() {
            return board;
        }
    }
}
