//! Standard event handlers.
//!
//! Each category module contributes handlers, validators, and previewers to a
//! [`HandlerRegistry`], which is installed into a [`World`] when an
//! [`crate::EventProcessor`] is built. Story code can start from
//! [`HandlerRegistry::standard`] and override individual types before
//! construction.

use std::collections::BTreeMap;
use std::fmt;

use tw_core::{EntityId, SemanticEvent};
use tw_world::{
    Entity, EventPreviewer, EventValidator, StandardHandler, World, WorldError, WorldModel,
    WorldResult, event_previewer, event_validator, standard_handler,
};

/// Handlers for taking, dropping, putting, removing, and actor movement.
pub mod movement;
/// Handlers for opening, locking, wearing, and generic property changes.
pub mod state_change;
/// Handlers for examining, searching, and looking.
pub mod observation;
/// Handlers for switchable devices.
pub mod device;
/// Handlers for pushing, pulling, turning, eating, and destroying.
pub mod manipulation;
/// Handlers for score, flags, and other story bookkeeping.
pub mod meta;

/// A set of per-type standard handlers, validators, and previewers.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<String, StandardHandler<World>>,
    validators: BTreeMap<String, EventValidator<World>>,
    previewers: BTreeMap<String, EventPreviewer<World>>,
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("validators", &self.validators.keys().collect::<Vec<_>>())
            .field("previewers", &self.previewers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl HandlerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every standard category.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        movement::register(&mut registry);
        state_change::register(&mut registry);
        observation::register(&mut registry);
        device::register(&mut registry);
        manipulation::register(&mut registry);
        meta::register(&mut registry);
        registry
    }

    /// Set the handler for a type, replacing any existing one.
    pub fn handle<F>(&mut self, event_type: &str, handler: F) -> &mut Self
    where
        F: Fn(&SemanticEvent, &mut World) -> WorldResult<()> + Send + Sync + 'static,
    {
        self.handlers
            .insert(event_type.to_string(), standard_handler(handler));
        self
    }

    /// Set the validator for a type, replacing any existing one.
    pub fn validate<F>(&mut self, event_type: &str, validator: F) -> &mut Self
    where
        F: Fn(&SemanticEvent, &World) -> bool + Send + Sync + 'static,
    {
        self.validators
            .insert(event_type.to_string(), event_validator(validator));
        self
    }

    /// Set the previewer for a type, replacing any existing one.
    pub fn preview<F>(&mut self, event_type: &str, previewer: F) -> &mut Self
    where
        F: Fn(&SemanticEvent, &World) -> Vec<tw_world::WorldChange> + Send + Sync + 'static,
    {
        self.previewers
            .insert(event_type.to_string(), event_previewer(previewer));
        self
    }

    /// Drop everything registered for a type.
    pub fn remove(&mut self, event_type: &str) -> bool {
        let handler = self.handlers.remove(event_type).is_some();
        let validator = self.validators.remove(event_type).is_some();
        let previewer = self.previewers.remove(event_type).is_some();
        handler || validator || previewer
    }

    /// `true` if a handler is registered for the type.
    pub fn handles(&self, event_type: &str) -> bool {
        self.handlers.contains_key(event_type)
    }

    /// Event types with a handler, sorted.
    pub fn event_types(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Number of handled types.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// `true` if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Copy everything into a world, replacing what it had for the same types.
    pub fn install(&self, world: &mut World) {
        for (event_type, handler) in &self.handlers {
            world.register_event_handler(event_type, handler.clone());
        }
        for (event_type, validator) in &self.validators {
            world.register_event_validator(event_type, validator.clone());
        }
        for (event_type, previewer) in &self.previewers {
            world.register_event_previewer(event_type, previewer.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers for the category modules
// ---------------------------------------------------------------------------

/// The event's target, mutably.
pub(crate) fn target_mut<'w>(world: &'w mut World, event: &SemanticEvent) -> WorldResult<&'w mut Entity> {
    let id = event.require_target()?;
    world
        .get_entity_mut(id)
        .ok_or_else(|| WorldError::EntityNotFound(id.clone()))
}

/// The event's target, if it names an existing entity.
pub(crate) fn target<'w>(world: &'w World, event: &SemanticEvent) -> Option<&'w Entity> {
    event.target().and_then(|id| world.get_entity(id))
}

pub(crate) fn missing_trait(entity: &EntityId, trait_name: &'static str) -> WorldError {
    WorldError::MissingTrait {
        entity: entity.clone(),
        trait_name,
    }
}

/// Validator: the event targets an existing entity.
pub(crate) fn target_exists(event: &SemanticEvent, world: &World) -> bool {
    target(world, event).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_core::types::{OPENED, TAKEN};

    #[test]
    fn standard_registry_covers_every_category() {
        let registry = HandlerRegistry::standard();
        for event_type in [
            TAKEN,
            OPENED,
            tw_core::types::EXAMINED,
            tw_core::types::SWITCHED_ON,
            tw_core::types::PUSHED,
            tw_core::types::SCORE_CHANGED,
        ] {
            assert!(registry.handles(event_type), "missing {event_type}");
        }
    }

    #[test]
    fn later_handle_replaces_earlier() {
        let mut registry = HandlerRegistry::standard();
        let before = registry.len();
        registry.handle(OPENED, |_, _| Err(WorldError::Rejected("sealed".into())));
        assert_eq!(registry.len(), before);

        let mut world = World::default();
        world.add_entity(Entity::new("box", "box").openable(false)).unwrap();
        registry.install(&mut world);
        let err = world
            .apply_event(&SemanticEvent::new(OPENED).with_target("box"))
            .unwrap_err();
        assert_eq!(err.to_string(), "sealed");
    }

    #[test]
    fn remove_clears_all_tables_for_type() {
        let mut registry = HandlerRegistry::standard();
        assert!(registry.remove(OPENED));
        assert!(!registry.handles(OPENED));
        assert!(!registry.remove(OPENED));

        let mut world = World::default();
        registry.install(&mut world);
        assert!(!world.has_event_handler(OPENED));
        assert!(world.can_apply_event(&SemanticEvent::new(OPENED)));
    }

    #[test]
    fn empty_registry_installs_nothing() {
        let registry = HandlerRegistry::new();
        assert!(registry.is_empty());
        let mut world = World::default();
        registry.install(&mut world);
        assert!(!world.has_event_handler(TAKEN));
    }
}
