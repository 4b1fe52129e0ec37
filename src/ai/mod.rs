//! The automated opponent: positional heuristic and minimax search with
//! alpha-beta pruning.

pub mod heuristic;
mod minimax;

pub use heuristic::{evaluate_window, score_position, Heuristic, WindowHeuristic};
pub use minimax::{
    BestMove, Minimax, SearchResult, SearchStats, DEFAULT_DEPTH, DRAW_SCORE, LOSS_SCORE, WIN_SCORE,
};
