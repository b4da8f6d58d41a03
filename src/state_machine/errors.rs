//! Error types for the result state machine

use thiserror::Error;

/// Errors surfaced while applying a result transition
#[derive(Debug, Error)]
pub enum StateMachineError {
    #[error("Persistence failed: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Event serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal state machine error: {0}")]
    Internal(String),
}

/// Errors recording or resolving transition audit rows
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to save transition: {reason}")]
    TransitionSaveFailed { reason: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StateMachineResult<T> = Result<T, StateMachineError>;
pub type PersistenceResult<T> = Result<T, PersistenceError>;
