use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, trace};
use rayon::prelude::*;

use super::heuristic::{Heuristic, WindowHeuristic, MAX_HEURISTIC_MAGNITUDE};
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::game::{Board, Cell};

/// Leaf score when the automated side has four in a row.
pub const WIN_SCORE: i64 = 100_000_000_000_000;
/// Leaf score when the player has four in a row.
pub const LOSS_SCORE: i64 = -10_000_000_000_000;
/// Leaf score for a full board with no winner.
pub const DRAW_SCORE: i64 = 0;

pub const DEFAULT_DEPTH: u32 = 5;

// A forced result must outrank every positional score.
const _: () = assert!(MAX_HEURISTIC_MAGNITUDE < WIN_SCORE / 1_000_000);
const _: () = assert!(-MAX_HEURISTIC_MAGNITUDE > LOSS_SCORE / 1_000_000);

/// Outcome of one search node: the column to play and its minimax score.
/// `column` is `None` at a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub column: Option<usize>,
    pub score: i64,
}

/// Counters gathered while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub leaves: u64,
    pub cutoffs: u64,
}

impl SearchStats {
    fn merge(&mut self, other: SearchStats) {
        self.nodes += other.nodes;
        self.leaves += other.leaves;
        self.cutoffs += other.cutoffs;
    }
}

/// The automated side's decision at the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMove {
    pub column: usize,
    pub score: i64,
    pub stats: SearchStats,
}

/// Depth-limited minimax with alpha-beta pruning.
///
/// The automated side maximizes, the player minimizes, and every leaf is
/// scored from the automated side's point of view. Children are explored in
/// ascending column order and a child only replaces the running best when it
/// is strictly better, so the chosen column is the lowest one reaching the
/// minimax value. Pruning never changes that choice or the score; disabling it
/// gives plain exhaustive minimax.
#[derive(Clone)]
pub struct Minimax {
    depth: u32,
    pruning: bool,
    parallel_root: bool,
    heuristic: Arc<dyn Heuristic>,
}

impl Minimax {
    pub fn new(depth: u32) -> Self {
        Minimax {
            depth,
            pruning: true,
            parallel_root: false,
            heuristic: Arc::new(WindowHeuristic),
        }
    }

    pub fn with_heuristic(depth: u32, heuristic: impl Heuristic + 'static) -> Self {
        Minimax {
            heuristic: Arc::new(heuristic),
            ..Self::new(depth)
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.depth).parallel_root(config.parallel_root)
    }

    /// Enable or disable alpha-beta cutoffs.
    pub fn pruning(mut self, enabled: bool) -> Self {
        self.pruning = enabled;
        self
    }

    /// Search each root move on its own thread.
    pub fn parallel_root(mut self, enabled: bool) -> Self {
        self.parallel_root = enabled;
        self
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Choose the automated side's column on `board`.
    ///
    /// Searches at least one ply with a full `(-inf, +inf)` window.
    pub fn best_move(&self, board: &Board) -> Result<BestMove, SearchError> {
        if board.valid_locations().is_empty() {
            return Err(SearchError::NoValidLocations);
        }
        if board.winning_move(Cell::Player) || board.winning_move(Cell::Automated) {
            return Err(SearchError::GameAlreadyDecided);
        }

        let start = Instant::now();
        let depth = self.depth.max(1);
        let (result, stats) = if self.parallel_root {
            self.search_root_parallel(board, depth)
        } else {
            let mut stats = SearchStats::default();
            let result = self.node(board, depth, i64::MIN, i64::MAX, true, &mut stats);
            (result, stats)
        };
        let column = result.column.ok_or(SearchError::NoValidLocations)?;

        debug!(
            "depth {depth}: column {column} score {} ({} nodes, {} leaves, {} cutoffs) in {:?}",
            result.score,
            stats.nodes,
            stats.leaves,
            stats.cutoffs,
            start.elapsed()
        );

        Ok(BestMove {
            column,
            score: result.score,
            stats,
        })
    }

    /// One minimax node. `alpha` is the score the maximizer is already
    /// guaranteed, `beta` the score the minimizer is already guaranteed.
    pub fn search(&self, board: &Board, depth: u32, alpha: i64, beta: i64, maximizing: bool) -> SearchResult {
        let mut stats = SearchStats::default();
        self.node(board, depth, alpha, beta, maximizing, &mut stats)
    }

    fn node(
        &self,
        board: &Board,
        depth: u32,
        mut alpha: i64,
        mut beta: i64,
        maximizing: bool,
        stats: &mut SearchStats,
    ) -> SearchResult {
        stats.nodes += 1;
        let valid = board.valid_locations();
        let terminal = board.is_terminal();

        if depth == 0 || terminal {
            stats.leaves += 1;
            return SearchResult {
                column: None,
                score: self.leaf_score(board, terminal),
            };
        }

        let (piece, mut best) = if maximizing {
            (Cell::Automated, i64::MIN)
        } else {
            (Cell::Player, i64::MAX)
        };
        let mut best_column = valid.first().copied();

        for &col in &valid {
            let Some(row) = board.next_open_row(col) else {
                continue;
            };
            let child = board.drop_piece(row, col, piece);
            let score = self
                .node(&child, depth - 1, alpha, beta, !maximizing, stats)
                .score;

            if maximizing {
                if score > best {
                    best = score;
                    best_column = Some(col);
                }
                alpha = alpha.max(best);
            } else {
                if score < best {
                    best = score;
                    best_column = Some(col);
                }
                beta = beta.min(best);
            }

            if self.pruning && alpha >= beta {
                stats.cutoffs += 1;
                break;
            }
        }

        SearchResult {
            column: best_column,
            score: best,
        }
    }

    fn leaf_score(&self, board: &Board, terminal: bool) -> i64 {
        if !terminal {
            return self.heuristic.evaluate(board, Cell::Automated);
        }
        if board.winning_move(Cell::Automated) {
            WIN_SCORE
        } else if board.winning_move(Cell::Player) {
            LOSS_SCORE
        } else {
            DRAW_SCORE
        }
    }

    /// Root of a maximizing search with the child subtrees spread over the
    /// rayon pool. Children get a full window, so each score is exact and the
    /// pick matches the sequential search.
    fn search_root_parallel(&self, board: &Board, depth: u32) -> (SearchResult, SearchStats) {
        let mut stats = SearchStats::default();
        if depth == 0 || board.is_terminal() {
            let result = self.node(board, depth, i64::MIN, i64::MAX, true, &mut stats);
            return (result, stats);
        }
        stats.nodes += 1;

        let valid = board.valid_locations();
        // Indexed collect keeps the children in ascending column order.
        let children: Vec<Option<(usize, SearchResult, SearchStats)>> = valid
            .as_slice()
            .par_iter()
            .map(|&col| {
                let row = board.next_open_row(col)?;
                let child = board.drop_piece(row, col, Cell::Automated);
                let mut child_stats = SearchStats::default();
                let result =
                    self.node(&child, depth - 1, i64::MIN, i64::MAX, false, &mut child_stats);
                Some((col, result, child_stats))
            })
            .collect();

        let mut best = SearchResult {
            column: valid.first().copied(),
            score: i64::MIN,
        };
        for (col, result, child_stats) in children.into_iter().flatten() {
            trace!("root column {col}: score {}", result.score);
            stats.merge(child_stats);
            if result.score > best.score {
                best = SearchResult {
                    column: Some(col),
                    score: result.score,
                };
            }
        }
        (best, stats)
    }
}

impl Default for Minimax {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl fmt::Debug for Minimax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Minimax")
            .field("depth", &self.depth)
            .field("pruning", &self.pruning)
            .field("parallel_root", &self.parallel_root)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, Side, COLS, ROWS};
    use crate::testing::{random_midgame_board, DRAW_SEQUENCE};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board(s: &str) -> Board {
        s.parse().expect("fixture should parse")
    }

    // --- Leaf tests ---

    #[test]
    fn depth_zero_returns_heuristic_leaf() {
        let board = board(
            "
            .......
            .......
            .......
            .......
            .......
            ...O...
            ",
        );
        let result = Minimax::new(5).search(&board, 0, i64::MIN, i64::MAX, true);
        assert_eq!(result, SearchResult { column: None, score: 3 });
    }

    #[test]
    fn terminal_leaves_use_fixed_scores() {
        let automated_won = board(
            "
            .......
            .......
            ...O...
            ...O...
            ...O..X
            ...O.XX
            ",
        );
        let player_won = board(
            "
            .......
            .......
            .......
            .......
            ..OOO..
            .XXXX..
            ",
        );
        let searcher = Minimax::new(3);
        for maximizing in [true, false] {
            let won = searcher.search(&automated_won, 3, i64::MIN, i64::MAX, maximizing);
            assert_eq!(won, SearchResult { column: None, score: WIN_SCORE });
            let lost = searcher.search(&player_won, 3, i64::MIN, i64::MAX, maximizing);
            assert_eq!(lost, SearchResult { column: None, score: LOSS_SCORE });
        }
    }

    #[test]
    fn full_board_draw_scores_zero_without_move() {
        let mut state = GameState::initial();
        let mut side = Side::Player;
        for col in DRAW_SEQUENCE {
            state.apply_move_mut(col, side).unwrap();
            side = side.other();
        }
        let board = *state.board();
        assert_eq!(board.piece_count(), ROWS * COLS);

        for depth in 0..=6 {
            let result = Minimax::new(depth).search(&board, depth, i64::MIN, i64::MAX, true);
            assert_eq!(result, SearchResult { column: None, score: 0 });
        }
        assert_eq!(
            Minimax::new(5).best_move(&board),
            Err(SearchError::NoValidLocations)
        );
    }

    #[test]
    fn best_move_rejects_decided_board() {
        let board = board(
            "
            .......
            .......
            .......
            .......
            ..OOO..
            .XXXX..
            ",
        );
        assert_eq!(
            Minimax::new(5).best_move(&board),
            Err(SearchError::GameAlreadyDecided)
        );
    }

    // --- Move selection tests ---

    #[test]
    fn takes_vertical_win_in_column_two() {
        let board = board(
            "
            .......
            .......
            .......
            ..O....
            ..O....
            .XOX..X
            ",
        );
        for depth in 1..=5 {
            let best = Minimax::new(depth).best_move(&board).unwrap();
            assert_eq!(best.column, 2, "depth {depth}");
            assert_eq!(best.score, WIN_SCORE);
        }
    }

    #[test]
    fn blocks_opponent_win() {
        let board = board(
            "
            .......
            .......
            .......
            .......
            ......O
            XXX..OO
            ",
        );
        for depth in 1..=5 {
            let best = Minimax::new(depth).best_move(&board).unwrap();
            assert_eq!(best.column, 3, "depth {depth}");
        }
    }

    #[test]
    fn prefers_win_over_block() {
        // the computer can win in column 3 while the player threatens column 6
        let board = board(
            "
            .......
            .......
            .......
            ......X
            ......X
            OOO...X
            ",
        );
        let best = Minimax::new(4).best_move(&board).unwrap();
        assert_eq!(best.column, 3);
        assert_eq!(best.score, WIN_SCORE);
    }

    #[test]
    fn opening_move_is_center() {
        let best = Minimax::new(5).best_move(&Board::new()).unwrap();
        assert_eq!(best.column, 3);
        assert_eq!(best.score, 12);
    }

    #[test]
    fn minimizing_node_picks_player_win() {
        let board = board(
            "
            .......
            .......
            .......
            .......
            ......O
            .XXX.OO
            ",
        );
        let result = Minimax::new(2).search(&board, 2, i64::MIN, i64::MAX, false);
        assert_eq!(result.column, Some(0));
        assert_eq!(result.score, LOSS_SCORE);
    }

    // --- Pruning equivalence ---

    #[test]
    fn pruning_matches_exhaustive_minimax() {
        let mut rng = StdRng::seed_from_u64(2024);
        let pruned = Minimax::new(0);
        let exhaustive = Minimax::new(0).pruning(false);
        for _ in 0..120 {
            let board = random_midgame_board(&mut rng, 30);
            for depth in 1..=4 {
                for maximizing in [true, false] {
                    let fast = pruned.search(&board, depth, i64::MIN, i64::MAX, maximizing);
                    let slow = exhaustive.search(&board, depth, i64::MIN, i64::MAX, maximizing);
                    assert_eq!(fast, slow, "depth {depth} maximizing {maximizing}\n{board}");
                }
            }
        }
    }

    #[test]
    fn pruning_visits_fewer_nodes() {
        let pruned = Minimax::new(5).best_move(&Board::new()).unwrap();
        let exhaustive = Minimax::new(5)
            .pruning(false)
            .best_move(&Board::new())
            .unwrap();
        assert_eq!(pruned.column, exhaustive.column);
        assert_eq!(pruned.score, exhaustive.score);
        assert_eq!(exhaustive.stats.nodes, (0..=5).map(|d| 7u64.pow(d)).sum::<u64>());
        assert_eq!(exhaustive.stats.cutoffs, 0);
        assert!(pruned.stats.nodes < exhaustive.stats.nodes);
        assert!(pruned.stats.cutoffs > 0);
    }

    #[test]
    fn parallel_root_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(99);
        let sequential = Minimax::new(4);
        let parallel = Minimax::new(4).parallel_root(true);
        for _ in 0..40 {
            let board = random_midgame_board(&mut rng, 24);
            let a = sequential.best_move(&board).unwrap();
            let b = parallel.best_move(&board).unwrap();
            assert_eq!((a.column, a.score), (b.column, b.score), "\n{board}");
        }
    }

    #[test]
    fn depth_zero_searcher_still_moves() {
        let best = Minimax::new(0).best_move(&Board::new()).unwrap();
        assert!(best.column < COLS);
    }

    #[test]
    fn custom_heuristic_drives_leaf_scores() {
        struct PreferRight;
        impl Heuristic for PreferRight {
            fn evaluate(&self, board: &Board, piece: Cell) -> i64 {
                (0..COLS)
                    .filter(|&col| board.get(0, col) == piece)
                    .map(|col| col as i64)
                    .sum()
            }
        }
        let best = Minimax::with_heuristic(1, PreferRight)
            .best_move(&Board::new())
            .unwrap();
        assert_eq!(best.column, 6);
    }
}
