use log::info;

use super::{Board, Side, COLS};
use crate::ai::Minimax;
use crate::error::{MoveError, SearchError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    InProgress,
    PlayerWins,
    AutomatedWins,
    Draw,
}

impl GameOutcome {
    /// The outcome in which `side` has won.
    pub fn win_for(side: Side) -> Self {
        match side {
            Side::Player => GameOutcome::PlayerWins,
            Side::Automated => GameOutcome::AutomatedWins,
        }
    }

    /// Check if the game has ended
    pub fn is_over(self) -> bool {
        self != GameOutcome::InProgress
    }
}

/// Whose move the controller is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    PlayerTurn,
    AutomatedTurn,
}

impl Turn {
    pub fn side(self) -> Side {
        match self {
            Turn::PlayerTurn => Side::Player,
            Turn::AutomatedTurn => Side::Automated,
        }
    }

    fn next(self) -> Turn {
        match self {
            Turn::PlayerTurn => Turn::AutomatedTurn,
            Turn::AutomatedTurn => Turn::PlayerTurn,
        }
    }
}

/// Place `side`'s piece in `column` and report the outcome for the mover.
///
/// Works on a copy; `board` itself is never touched.
pub fn play(board: &Board, column: usize, side: Side) -> Result<(Board, GameOutcome), MoveError> {
    if column >= COLS {
        return Err(MoveError::InvalidColumn(column));
    }
    if board.outcome().is_over() {
        return Err(MoveError::GameOver);
    }
    let row = board
        .next_open_row(column)
        .ok_or(MoveError::ColumnFull(column))?;

    let next = board.drop_piece(row, column, side.piece());
    let outcome = if next.winning_move(side.piece()) {
        GameOutcome::win_for(side)
    } else if next.valid_locations().is_empty() {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    };
    Ok((next, outcome))
}

/// The live game: the single owned board plus whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Turn,
}

impl GameState {
    /// Create initial game state. The player moves first.
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            turn: Turn::PlayerTurn,
        }
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Outcome of the game so far, recomputed from the board.
    pub fn outcome(&self) -> GameOutcome {
        self.board.outcome()
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_over()
    }

    /// Apply a move and return the new state (immutable).
    pub fn apply_move(&self, column: usize, side: Side) -> Result<(GameState, GameOutcome), MoveError> {
        let mut next = *self;
        let outcome = next.apply_move_mut(column, side)?;
        Ok((next, outcome))
    }

    /// Apply move mutably (for UI efficiency). On error nothing changes.
    pub fn apply_move_mut(&mut self, column: usize, side: Side) -> Result<GameOutcome, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if side != self.turn.side() {
            return Err(MoveError::NotYourTurn {
                expected: self.turn.side(),
            });
        }

        let (board, outcome) = play(&self.board, column, side)?;
        self.board = board;
        self.turn = self.turn.next();
        info!("{} dropped in column {column}: {outcome:?}", side.name());
        Ok(outcome)
    }

    /// Pick the automated side's column for the current board.
    pub fn automated_turn(&self, searcher: &Minimax) -> Result<usize, SearchError> {
        searcher.best_move(&self.board).map(|result| result.column)
    }

    /// Start over with an empty board.
    pub fn reset(&mut self) {
        *self = GameState::initial();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
