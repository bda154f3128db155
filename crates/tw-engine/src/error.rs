//! Error types for the turn host.

use thiserror::Error;

/// Result type for session operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors a session raises before any action runs.
///
/// Once an action is found, everything that goes wrong is reported as
/// events instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No action is registered under the command's id.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// The world has no player to act.
    #[error("world has no player")]
    NoPlayer,
}
