use serde::{Deserialize, Serialize};

/// One grid position as stored by the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) mine: bool,
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
    pub(crate) adjacent: Option<u8>,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.mine
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    /// Number of adjacent mines, known once a safe cell has been revealed.
    pub const fn adjacent_mines(self) -> Option<u8> {
        self.adjacent
    }
}

/// Player-visible state of a cell, as drawn by a front-end.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Open(u8),
    Mine,
    /// The mine that ended the game.
    Exploded,
    /// A flag left on a safe cell after a loss.
    IncorrectFlag,
}

impl CellView {
    pub const fn symbol(self) -> char {
        use CellView::*;
        match self {
            Hidden => '-',
            Flagged => 'F',
            Open(0) => ' ',
            Open(count) => (b'0' + count) as char,
            Mine => '*',
            Exploded => 'X',
            IncorrectFlag => '!',
        }
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
