use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Please enter a valid number!")]
    InvalidGuess,
    #[error("No card with that id")]
    InvalidCard,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Unknown game")]
    UnknownGame,
}

pub type Result<T> = core::result::Result<T, GameError>;
