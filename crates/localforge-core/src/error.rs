//! Error types for LocalForge

use thiserror::Error;

/// Main error type for LocalForge operations
#[derive(Debug, Error)]
pub enum LocalForgeError {
    /// Error in solver or phase configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A score calculated incrementally or after an undo disagrees with the
    /// score calculated from scratch
    #[error("Score corruption: {0}")]
    ScoreCorruption(String),

    /// Failure inside the move evaluation thread pool
    #[error("Move thread error: {0}")]
    MoveThread(String),

    /// Solver was cancelled before completion
    #[error("Solver was cancelled")]
    Cancelled,

    /// Invalid operation for current solver state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LocalForgeError {
    /// Returns true for errors that signal a corrupted working solution.
    pub fn is_corruption(&self) -> bool {
        matches!(self, LocalForgeError::ScoreCorruption(_))
    }
}

/// Result type alias for LocalForge operations
pub type Result<T> = std::result::Result<T, LocalForgeError>;
