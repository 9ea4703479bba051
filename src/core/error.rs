//! Error taxonomy.
//!
//! `GameError` is surfaced synchronously from construction and flip calls.
//! `StorageError` is the persistence failure class: storage ports return it,
//! but the leaderboard logs and swallows it so a game never fails on I/O.
//! `CatalogueError` covers adding images, where the caller must know the
//! image file was not written.

use thiserror::Error;

/// Errors returned by game construction and flip operations.
///
/// A call that returns an error has left the game state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Bad construction-time parameter (pair count, player name, capacity).
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Card index outside `0..card_count`.
    #[error("Card index {index} is out of range (card count {card_count})")]
    IndexOutOfRange { index: usize, card_count: usize },

    /// The operation is not allowed in the current state.
    #[error("Invalid operation: {message}")]
    OperationInvalid { message: String },
}

impl GameError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument { message: message.into() }
    }

    pub(crate) fn operation_invalid(message: impl Into<String>) -> Self {
        Self::OperationInvalid { message: message.into() }
    }
}

/// Persistence failures raised by a storage port.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors returned by the card image catalogue.
#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("Invalid image name: {0:?}")]
    InvalidName(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<std::io::Error> for CatalogueError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(StorageError::Io(err))
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
