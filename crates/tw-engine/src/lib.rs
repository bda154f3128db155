//! Turn host for Taleweaver.
//!
//! A [`GameSession`] ties the action layer to the event processor: it looks
//! up the action for a [`ParsedCommand`](tw_stdlib::ParsedCommand), runs it
//! against the world, and hands the events it produced to the
//! [`EventProcessor`](tw_events::EventProcessor), which applies them and
//! cascades reactions. Parsing input and rendering text are left to the
//! host.

/// Error types for the session.
pub mod error;
/// The game session.
pub mod session;

/// Re-exports of [`error::EngineError`] and [`error::EngineResult`].
pub use error::{EngineError, EngineResult};
/// Re-exports of the session types.
pub use session::{GameSession, TurnResult};
