//! World model for Taleweaver.
//!
//! The [`World`] is the single mutable store every handler works against:
//! entities with trait data, a containment graph, free-form world state, and
//! the per-type handler, validator, and previewer tables that decide how an
//! event changes it. The [`WorldModel`] trait is the surface the event
//! processor relies on; [`World`] is the in-memory implementation.

/// Descriptions of what an event would change.
pub mod change;
/// Declarative effects and the reaction items handlers return.
pub mod effect;
/// Entities and their per-entity handler tables.
pub mod entity;
/// Error types for world mutation and handlers.
pub mod error;
/// The collaborator trait consumed by the event processor.
pub mod model;
/// Trait data attached to entities (openable, switchable, wearable, ...).
pub mod traits;
/// The in-memory world store.
pub mod world;

/// Re-exports of [`change::WorldChange`] and [`change::ChangeKind`].
pub use change::{ChangeKind, WorldChange};
/// Re-exports of [`effect::Effect`] and [`effect::Reaction`].
pub use effect::{Effect, Reaction};
/// Re-exports of entity types.
pub use entity::{Entity, EntityHandlers};
/// Re-exports of the error types.
pub use error::{HandlerError, HandlerResult, WorldError, WorldResult};
/// Re-exports of the collaborator trait and handler signatures.
pub use model::{
    EntityHandler, EventPreviewer, EventValidator, StandardHandler, WorldModel, entity_handler,
    event_previewer, event_validator, standard_handler,
};
/// Re-export of [`traits::TraitSet`].
pub use traits::TraitSet;
/// Re-exports of the world store and its configuration.
pub use world::{World, WorldConfig};
