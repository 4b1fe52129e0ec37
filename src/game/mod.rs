//! Connect Four rules: gravity-fed board, win detection, and the turn
//! controller that alternates the player and the automated side.

mod board;
mod side;
mod state;

pub use board::{Board, Cell, Direction, ValidLocations, Window, CENTER_COL, COLS, ROWS, WINDOW_LEN};
pub use side::Side;
pub use state::{play, GameOutcome, GameState, Turn};
