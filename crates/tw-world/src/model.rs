use std::sync::Arc;

use tw_core::{EntityId, SemanticEvent};

use serde_json::Value;

use crate::change::WorldChange;
use crate::effect::Reaction;
use crate::entity::Entity;
use crate::error::{HandlerResult, WorldResult};

/// Per-type callback run inside [`WorldModel::apply_event`]. It performs the
/// actual mutation for one event type.
pub type StandardHandler<W> = Arc<dyn Fn(&SemanticEvent, &mut W) -> WorldResult<()> + Send + Sync>;

/// Per-type predicate consulted by [`WorldModel::can_apply_event`]. Must not mutate.
pub type EventValidator<W> = Arc<dyn Fn(&SemanticEvent, &W) -> bool + Send + Sync>;

/// Per-type description of what an event would change. Must not mutate.
pub type EventPreviewer<W> = Arc<dyn Fn(&SemanticEvent, &W) -> Vec<WorldChange> + Send + Sync>;

/// Per-entity, per-type reaction callback.
///
/// Runs after the standard handler for events whose target is the owning
/// entity. Returned events are processed as reactions; returned effects are
/// applied as one batch.
pub type EntityHandler<W> =
    Arc<dyn Fn(&SemanticEvent, &mut W) -> HandlerResult<Vec<Reaction>> + Send + Sync>;

/// Wrap a closure as a [`StandardHandler`].
pub fn standard_handler<W, F>(handler: F) -> StandardHandler<W>
where
    F: Fn(&SemanticEvent, &mut W) -> WorldResult<()> + Send + Sync + 'static,
{
    Arc::new(handler)
}

/// Wrap a closure as an [`EventValidator`].
pub fn event_validator<W, F>(validator: F) -> EventValidator<W>
where
    F: Fn(&SemanticEvent, &W) -> bool + Send + Sync + 'static,
{
    Arc::new(validator)
}

/// Wrap a closure as an [`EventPreviewer`].
pub fn event_previewer<W, F>(previewer: F) -> EventPreviewer<W>
where
    F: Fn(&SemanticEvent, &W) -> Vec<WorldChange> + Send + Sync + 'static,
{
    Arc::new(previewer)
}

/// Wrap a closure as an [`EntityHandler`].
pub fn entity_handler<W, F>(handler: F) -> EntityHandler<W>
where
    F: Fn(&SemanticEvent, &mut W) -> HandlerResult<Vec<Reaction>> + Send + Sync + 'static,
{
    Arc::new(handler)
}

/// The world operations the event processor and standard handlers rely on.
pub trait WorldModel: Sized {
    /// Look up an entity.
    fn get_entity(&self, id: &EntityId) -> Option<&Entity>;

    /// Check an event against the registered validator. Pure.
    fn can_apply_event(&self, event: &SemanticEvent) -> bool;

    /// Describe what the event would change. Pure.
    fn preview_event(&self, event: &SemanticEvent) -> Vec<WorldChange>;

    /// Apply an event by running the standard handler for its type, if any.
    fn apply_event(&mut self, event: &SemanticEvent) -> WorldResult<()>;

    /// Register, or replace, the standard handler for an event type.
    fn register_event_handler(&mut self, event_type: &str, handler: StandardHandler<Self>);

    /// Relocate an entity in the containment graph.
    fn move_entity(&mut self, id: &EntityId, destination: &EntityId) -> WorldResult<()>;

    /// Delete an entity from the world.
    fn remove_entity(&mut self, id: &EntityId) -> WorldResult<Entity>;

    /// Mutate an entity in place.
    fn update_entity<F>(&mut self, id: &EntityId, mutator: F) -> WorldResult<()>
    where
        F: FnOnce(&mut Entity);

    /// Read a world state value.
    fn state_value(&self, key: &str) -> Option<&Value>;

    /// Set a world state value, returning the previous one.
    fn set_state_value(&mut self, key: String, value: Value) -> Option<Value>;

    /// The container or room directly holding an entity.
    fn get_location(&self, id: &EntityId) -> Option<&EntityId>;

    /// Entity-level handlers registered on `id` for `event_type`, in
    /// registration order. `None` if the entity does not exist.
    fn entity_handlers(
        &self,
        id: &EntityId,
        event_type: &str,
    ) -> Option<Vec<EntityHandler<Self>>>;

    /// `true` if the entity exists.
    fn has_entity(&self, id: &EntityId) -> bool {
        self.get_entity(id).is_some()
    }
}
