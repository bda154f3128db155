//! Event processing for Taleweaver.
//!
//! The [`EventProcessor`] takes the semantic events an action produced and
//! applies them to the world one at a time: validate, optionally preview,
//! apply through the standard handler, then collect reactions from the
//! target's entity handlers and from story handlers. Reactions are events or
//! effects; an event's effects are checked and applied as one batch, and the
//! events they emit join its reactions. Reactions are processed level by
//! level under a depth bound. A failing event never stops its
//! siblings, and nothing raised by handler code escapes
//! [`EventProcessor::process_events`].

/// Processor configuration.
pub mod config;
/// Batch application of handler effects.
pub mod effects;
/// Invocation of entity-level handlers.
pub mod entity_handlers;
/// Error types for the events crate.
pub mod error;
/// Standard handler registry and its categories.
pub mod handlers;
/// The event processor.
pub mod processor;
/// Result types returned by the processor.
pub mod result;
/// Story-level handler registry.
pub mod story;

/// Re-export of [`config::ProcessorOptions`].
pub use config::ProcessorOptions;
/// Re-exports of [`effects::EffectProcessor`] and [`effects::EffectError`].
pub use effects::{EffectError, EffectProcessor};
/// Re-export of [`entity_handlers::invoke_entity_handlers`].
pub use entity_handlers::invoke_entity_handlers;
/// Re-exports of [`error::EventsError`] and [`error::EventsResult`].
pub use error::{EventsError, EventsResult};
/// Re-export of [`handlers::HandlerRegistry`].
pub use handlers::HandlerRegistry;
/// Re-export of [`processor::EventProcessor`].
pub use processor::EventProcessor;
/// Re-exports of the result types.
pub use result::{FailedEvent, ProcessedEvents};
/// Re-exports of the story handler types.
pub use story::{HandlerId, StoryHandler, StoryHandlers, story_handler};
