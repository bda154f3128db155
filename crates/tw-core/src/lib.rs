//! Core types for Taleweaver: identifiers, semantic events, and event history.
//!
//! Everything that happens in a Taleweaver world is described by a
//! [`SemanticEvent`]. Actions create them, the event processor applies them,
//! and the world keeps a bounded [`EventLog`] of the ones that were applied.
//! This crate has no knowledge of the world model itself.

/// Entity identifiers shared by every layer.
pub mod entity;
/// Error types for event construction and payload access.
pub mod error;
/// The semantic event record and its entity references.
pub mod event;
/// Bounded, queryable history of applied events.
pub mod log;
/// Namespaced event type constants used by the standard library.
pub mod types;

/// Re-export of [`entity::EntityId`].
pub use entity::EntityId;
/// Re-exports of [`error::CoreError`] and [`error::CoreResult`].
pub use error::{CoreError, CoreResult};
/// Re-exports of the event record types.
pub use event::{EventData, EventEntities, EventId, SemanticEvent};
/// Re-export of [`log::EventLog`].
pub use log::EventLog;
