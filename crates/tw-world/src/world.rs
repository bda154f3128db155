use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::trace;
use tw_core::{EntityId, EventLog, SemanticEvent};

use crate::change::WorldChange;
use crate::entity::Entity;
use crate::error::{WorldError, WorldResult};
use crate::model::{EntityHandler, EventPreviewer, EventValidator, StandardHandler, WorldModel};

/// Configuration for a world store.
#[derive(Debug, Clone)]
pub struct WorldConfig {
    /// Maximum applied-event history (oldest dropped when exceeded). 0 = unlimited.
    pub max_event_history: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            max_event_history: 1000,
        }
    }
}

impl WorldConfig {
    /// Set the applied-event history bound (0 = unlimited).
    pub fn with_max_event_history(mut self, max: usize) -> Self {
        self.max_event_history = max;
        self
    }
}

/// The in-memory world store. Owns every entity, the containment graph, and
/// the per-type tables that decide how events change it.
#[derive(Clone)]
pub struct World {
    entities: HashMap<EntityId, Entity>,
    player: Option<EntityId>,
    state: HashMap<String, Value>,

    // Containment
    location_of: HashMap<EntityId, EntityId>,
    contents_of: HashMap<EntityId, Vec<EntityId>>,

    // Event sourcing
    handlers: HashMap<String, StandardHandler<World>>,
    validators: HashMap<String, EventValidator<World>>,
    previewers: HashMap<String, EventPreviewer<World>>,
    history: EventLog,
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut handler_types: Vec<&String> = self.handlers.keys().collect();
        handler_types.sort();
        f.debug_struct("World")
            .field("entities", &self.entities.len())
            .field("player", &self.player)
            .field("handlers", &handler_types)
            .field("history", &self.history.len())
            .finish()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl World {
    /// Create an empty world.
    pub fn new(config: WorldConfig) -> Self {
        Self {
            entities: HashMap::new(),
            player: None,
            state: HashMap::new(),
            location_of: HashMap::new(),
            contents_of: HashMap::new(),
            handlers: HashMap::new(),
            validators: HashMap::new(),
            previewers: HashMap::new(),
            history: EventLog::new(config.max_event_history),
        }
    }

    // -----------------------------------------------------------------------
    // Entity CRUD
    // -----------------------------------------------------------------------

    /// Add an entity. Returns its id.
    pub fn add_entity(&mut self, entity: Entity) -> WorldResult<EntityId> {
        if self.entities.contains_key(&entity.id) {
            return Err(WorldError::DuplicateEntity(entity.id));
        }
        let id = entity.id.clone();
        if entity.is_player() && self.player.is_none() {
            self.player = Some(id.clone());
        }
        self.entities.insert(id.clone(), entity);
        Ok(id)
    }

    /// Add an entity and place it inside `location` in one step.
    pub fn add_entity_at(&mut self, entity: Entity, location: &EntityId) -> WorldResult<EntityId> {
        if !self.entities.contains_key(location) {
            return Err(WorldError::DestinationNotFound(location.clone()));
        }
        let id = self.add_entity(entity)?;
        self.move_entity(&id, location)?;
        Ok(id)
    }

    /// Mutable access to an entity.
    pub fn get_entity_mut(&mut self, id: &EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Look an entity up, or fail with [`WorldError::EntityNotFound`].
    pub fn entity(&self, id: &EntityId) -> WorldResult<&Entity> {
        self.entities
            .get(id)
            .ok_or_else(|| WorldError::EntityNotFound(id.clone()))
    }

    /// Number of entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Attach an entity-level handler to an existing entity.
    pub fn add_entity_handler(
        &mut self,
        id: &EntityId,
        event_type: impl Into<String>,
        handler: EntityHandler<World>,
    ) -> WorldResult<()> {
        let entity = self
            .entities
            .get_mut(id)
            .ok_or_else(|| WorldError::EntityNotFound(id.clone()))?;
        entity.on.add(event_type, handler);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Player
    // -----------------------------------------------------------------------

    /// Make an existing entity the player.
    pub fn set_player(&mut self, id: &EntityId) -> WorldResult<()> {
        if !self.entities.contains_key(id) {
            return Err(WorldError::EntityNotFound(id.clone()));
        }
        self.player = Some(id.clone());
        Ok(())
    }

    /// The player's id, if one has been set.
    pub fn player_id(&self) -> Option<&EntityId> {
        self.player.as_ref()
    }

    /// The player entity, if one has been set.
    pub fn player(&self) -> Option<&Entity> {
        self.player.as_ref().and_then(|id| self.entities.get(id))
    }

    // -----------------------------------------------------------------------
    // Containment
    // -----------------------------------------------------------------------

    /// Direct contents of a room, container, supporter, or actor, in arrival order.
    pub fn contents(&self, id: &EntityId) -> &[EntityId] {
        self.contents_of
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The room an entity is ultimately in, walking up through containers.
    pub fn containing_room(&self, id: &EntityId) -> Option<&EntityId> {
        let mut current = self.location_of.get(id)?;
        loop {
            if self.entities.get(current).is_some_and(Entity::is_room) {
                return Some(current);
            }
            current = self.location_of.get(current)?;
        }
    }

    /// `true` if `ancestor` holds `id` directly or transitively.
    pub fn is_within(&self, id: &EntityId, ancestor: &EntityId) -> bool {
        let mut current = self.location_of.get(id);
        while let Some(loc) = current {
            if loc == ancestor {
                return true;
            }
            current = self.location_of.get(loc);
        }
        false
    }

    fn detach(&mut self, id: &EntityId) -> Option<EntityId> {
        let previous = self.location_of.remove(id)?;
        if let Some(siblings) = self.contents_of.get_mut(&previous) {
            siblings.retain(|e| e != id);
        }
        Some(previous)
    }

    // -----------------------------------------------------------------------
    // World state
    // -----------------------------------------------------------------------

    /// Read a world state value.
    pub fn state_value(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    /// Set a world state value, returning the previous one.
    pub fn set_state_value(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.state.insert(key.into(), value)
    }


    // -----------------------------------------------------------------------
    // Event handler tables
    // -----------------------------------------------------------------------

    /// Remove the standard handler for an event type.
    pub fn unregister_event_handler(&mut self, event_type: &str) -> bool {
        self.handlers.remove(event_type).is_some()
    }

    /// `true` if a standard handler is registered for the type.
    pub fn has_event_handler(&self, event_type: &str) -> bool {
        self.handlers.contains_key(event_type)
    }

    /// Register, or replace, the validator for an event type.
    pub fn register_event_validator(&mut self, event_type: &str, validator: EventValidator<World>) {
        self.validators.insert(event_type.to_string(), validator);
    }

    /// Register, or replace, the previewer for an event type.
    pub fn register_event_previewer(&mut self, event_type: &str, previewer: EventPreviewer<World>) {
        self.previewers.insert(event_type.to_string(), previewer);
    }

    // -----------------------------------------------------------------------
    // Event history
    // -----------------------------------------------------------------------

    /// Every applied event still in the history window, oldest first.
    pub fn applied_events(&self) -> &[SemanticEvent] {
        self.history.events()
    }

    /// Applied events created after `timestamp`.
    pub fn events_since(&self, timestamp: DateTime<Utc>) -> Vec<&SemanticEvent> {
        self.history.events_since(timestamp)
    }

    /// Forget the applied-event history.
    pub fn clear_event_history(&mut self) {
        self.history.clear();
    }
}

impl WorldModel for World {
    fn get_entity(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    fn can_apply_event(&self, event: &SemanticEvent) -> bool {
        match self.validators.get(event.event_type()) {
            Some(validator) => validator(event, self),
            None => true,
        }
    }

    fn preview_event(&self, event: &SemanticEvent) -> Vec<WorldChange> {
        match self.previewers.get(event.event_type()) {
            Some(previewer) => previewer(event, self),
            None => Vec::new(),
        }
    }

    fn apply_event(&mut self, event: &SemanticEvent) -> WorldResult<()> {
        match self.handlers.get(event.event_type()).cloned() {
            Some(handler) => handler(event, self)?,
            None => trace!(event_type = event.event_type(), "no standard handler, recording only"),
        }
        self.history.push(event.clone());
        Ok(())
    }

    fn register_event_handler(&mut self, event_type: &str, handler: StandardHandler<World>) {
        self.handlers.insert(event_type.to_string(), handler);
    }

    fn move_entity(&mut self, id: &EntityId, destination: &EntityId) -> WorldResult<()> {
        if !self.entities.contains_key(id) {
            return Err(WorldError::EntityNotFound(id.clone()));
        }
        if !self.entities.contains_key(destination) {
            return Err(WorldError::DestinationNotFound(destination.clone()));
        }
        if id == destination || self.is_within(destination, id) {
            return Err(WorldError::WouldCreateLoop {
                entity: id.clone(),
                destination: destination.clone(),
            });
        }
        self.detach(id);
        self.location_of.insert(id.clone(), destination.clone());
        self.contents_of
            .entry(destination.clone())
            .or_default()
            .push(id.clone());
        Ok(())
    }

    fn remove_entity(&mut self, id: &EntityId) -> WorldResult<Entity> {
        let entity = self
            .entities
            .remove(id)
            .ok_or_else(|| WorldError::EntityNotFound(id.clone()))?;

        self.detach(id);
        // Contents are left unplaced rather than deleted.
        if let Some(children) = self.contents_of.remove(id) {
            for child in children {
                self.location_of.remove(&child);
            }
        }
        if self.player.as_ref() == Some(id) {
            self.player = None;
        }
        Ok(entity)
    }

    fn update_entity<F>(&mut self, id: &EntityId, mutator: F) -> WorldResult<()>
    where
        F: FnOnce(&mut Entity),
    {
        let entity = self
            .entities
            .get_mut(id)
            .ok_or_else(|| WorldError::EntityNotFound(id.clone()))?;
        mutator(entity);
        Ok(())
    }

    fn state_value(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    fn set_state_value(&mut self, key: String, value: Value) -> Option<Value> {
        self.state.insert(key, value)
    }

    fn get_location(&self, id: &EntityId) -> Option<&EntityId> {
        self.location_of.get(id)
    }

    fn entity_handlers(
        &self,
        id: &EntityId,
        event_type: &str,
    ) -> Option<Vec<EntityHandler<World>>> {
        self.entities
            .get(id)
            .map(|entity| entity.on.get(event_type).to_vec())
    }
}
