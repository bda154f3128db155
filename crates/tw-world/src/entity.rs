use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tw_core::{EntityId, SemanticEvent};

use crate::effect::Reaction;
use crate::error::HandlerResult;
use crate::model::{EntityHandler, entity_handler};
use crate::traits::{
    ActorTrait, ContainerTrait, EdibleTrait, LockableTrait, OpenableTrait, RoomTrait,
    SceneryTrait, SupporterTrait, SwitchableTrait, TraitSet, WearableTrait,
};
use crate::world::World;

/// An entity's own reaction table: event type to handlers, in registration order.
///
/// Story content fills this in to special-case one object's response to an
/// event without touching the shared standard handlers.
#[derive(Clone, Default)]
pub struct EntityHandlers {
    handlers: HashMap<String, Vec<EntityHandler<World>>>,
}

impl EntityHandlers {
    /// Append a handler for an event type.
    pub fn add(&mut self, event_type: impl Into<String>, handler: EntityHandler<World>) {
        self.handlers
            .entry(event_type.into())
            .or_default()
            .push(handler);
    }

    /// Drop every handler for an event type. Returns `true` if any were registered.
    pub fn remove(&mut self, event_type: &str) -> bool {
        self.handlers.remove(event_type).is_some()
    }

    /// Handlers for an event type; empty if none.
    pub fn get(&self, event_type: &str) -> &[EntityHandler<World>] {
        self.handlers
            .get(event_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// `true` if at least one handler exists for the type.
    pub fn contains(&self, event_type: &str) -> bool {
        self.handlers.get(event_type).is_some_and(|h| !h.is_empty())
    }

    /// `true` if the table has no handlers at all.
    pub fn is_empty(&self) -> bool {
        self.handlers.values().all(Vec::is_empty)
    }
}

impl fmt::Debug for EntityHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<(&String, usize)> =
            self.handlers.iter().map(|(k, v)| (k, v.len())).collect();
        types.sort();
        f.debug_map().entries(types).finish()
    }
}

/// A thing in the world: a room, an object, an actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Trait data that decides which standard behaviors apply.
    pub traits: TraitSet,
    /// Arbitrary per-entity state, e.g. `"cursed": true`.
    pub properties: HashMap<String, Value>,
    /// Entity-level event handlers. Not serialized.
    #[serde(skip)]
    pub on: EntityHandlers,
}

impl Entity {
    /// Create an entity with no traits.
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            traits: TraitSet::default(),
            properties: HashMap::new(),
            on: EntityHandlers::default(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Make this entity a room.
    pub fn room(mut self) -> Self {
        self.traits.room = Some(RoomTrait::default());
        self
    }

    /// Make this entity an actor.
    pub fn actor(mut self, is_player: bool) -> Self {
        self.traits.actor = Some(ActorTrait { is_player });
        self
    }

    /// Make this entity a container with optional capacity.
    pub fn container(mut self, capacity: Option<usize>) -> Self {
        self.traits.container = Some(ContainerTrait { capacity });
        self
    }

    /// Make this entity a supporter.
    pub fn supporter(mut self) -> Self {
        self.traits.supporter = Some(SupporterTrait::default());
        self
    }

    /// Make this entity openable, starting open or closed.
    pub fn openable(mut self, is_open: bool) -> Self {
        self.traits.openable = Some(OpenableTrait { is_open });
        self
    }

    /// Make this entity lockable.
    pub fn lockable(mut self, is_locked: bool, key_id: Option<EntityId>) -> Self {
        self.traits.lockable = Some(LockableTrait { is_locked, key_id });
        self
    }

    /// Make this entity a switchable device.
    pub fn switchable(mut self, is_on: bool) -> Self {
        self.traits.switchable = Some(SwitchableTrait { is_on });
        self
    }

    /// Make this entity wearable.
    pub fn wearable(mut self) -> Self {
        self.traits.wearable = Some(WearableTrait::default());
        self
    }

    /// Fix this entity in place.
    pub fn scenery(mut self) -> Self {
        self.traits.scenery = Some(SceneryTrait::default());
        self
    }

    /// Make this entity edible.
    pub fn edible(mut self) -> Self {
        self.traits.edible = Some(EdibleTrait::default());
        self
    }

    /// Set a free-form property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Attach an entity-level handler.
    pub fn on<F>(mut self, event_type: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&SemanticEvent, &mut World) -> HandlerResult<Vec<Reaction>>
            + Send
            + Sync
            + 'static,
    {
        self.on.add(event_type, entity_handler(handler));
        self
    }

    /// Read a free-form property.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Read a boolean property; absent or non-boolean counts as `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.properties
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// `true` for rooms.
    pub fn is_room(&self) -> bool {
        self.traits.room.is_some()
    }

    /// `true` for the player-controlled actor.
    pub fn is_player(&self) -> bool {
        self.traits.actor.as_ref().is_some_and(|a| a.is_player)
    }

    /// `true` if the entity is openable and currently open, or not openable at all.
    pub fn is_accessible(&self) -> bool {
        self.traits.openable.as_ref().is_none_or(|o| o.is_open)
    }
}
