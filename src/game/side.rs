use super::board::Cell;

/// One of the two movers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Automated,
}

impl Side {
    /// Get the other side
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Automated,
            Side::Automated => Side::Player,
        }
    }

    /// The piece this side drops.
    pub fn piece(self) -> Cell {
        match self {
            Side::Player => Cell::Player,
            Side::Automated => Cell::Automated,
        }
    }

    /// Get side name for display
    pub fn name(self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Automated => "Computer",
        }
    }
}
