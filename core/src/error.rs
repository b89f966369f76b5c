use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must have between 1 and 65535 rows and columns")]
    InvalidDimensions,
    #[error("Mine count must be non-negative and leave at least one safe cell")]
    InvalidMineCount,
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Generated mine layout does not match the game config")]
    InvalidLayout,
}

pub type Result<T> = core::result::Result<T, GameError>;
