use std::path::PathBuf;

use crate::game::Side;

/// A rejected move request. The game state is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is out of range")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameOver,

    #[error("it is the {}'s turn", .expected.name())]
    NotYourTurn { expected: Side },
}

/// The automated move was requested on a board where no move can be made.
/// Callers must check the game outcome before asking for a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no valid locations left on the board")]
    NoValidLocations,

    #[error("the game is already decided")]
    GameAlreadyDecided,
}

/// Errors from parsing the text form of a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("expected 6 rows, found {0}")]
    RowCount(usize),

    #[error("row on line {line} has {len} cells, expected 7")]
    RowLength { line: usize, len: usize },

    #[error("unknown symbol {symbol:?} on line {line}")]
    UnknownSymbol { symbol: char, line: usize },

    #[error("piece at row {row}, column {col} has nothing beneath it")]
    FloatingPiece { row: usize, col: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
