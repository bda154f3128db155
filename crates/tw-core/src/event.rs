use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::entity::EntityId;
use crate::error::{CoreError, CoreResult};

/// Unique identifier for a semantic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    /// Generate a new random event ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Free-form, event-type-specific payload.
pub type EventData = serde_json::Map<String, Value>;

/// World references carried by an event. An absent slot means "not applicable".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntities {
    /// Who performed the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<EntityId>,
    /// What the action was performed on. Only targeted events reach entity handlers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<EntityId>,
    /// What the action was performed with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument: Option<EntityId>,
    /// Where it happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<EntityId>,
}

impl EventEntities {
    /// Set the actor slot.
    pub fn with_actor(mut self, id: impl Into<EntityId>) -> Self {
        self.actor = Some(id.into());
        self
    }

    /// Set the target slot.
    pub fn with_target(mut self, id: impl Into<EntityId>) -> Self {
        self.target = Some(id.into());
        self
    }

    /// Set the instrument slot.
    pub fn with_instrument(mut self, id: impl Into<EntityId>) -> Self {
        self.instrument = Some(id.into());
        self
    }

    /// Set the location slot.
    pub fn with_location(mut self, id: impl Into<EntityId>) -> Self {
        self.location = Some(id.into());
        self
    }
}

/// An immutable, typed, timestamped record of something that happened.
///
/// Fields are only readable. The `with_*` methods consume the value and are
/// meant for construction; once an event has been handed to the processor it
/// is never changed, and a reaction is always a fresh event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticEvent {
    id: EventId,
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    entities: EventEntities,
    #[serde(default)]
    data: EventData,
    timestamp: DateTime<Utc>,
}

impl SemanticEvent {
    /// Create an event of the given type with no entities and an empty payload.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            id: EventId::new(),
            event_type: event_type.into(),
            entities: EventEntities::default(),
            data: EventData::new(),
            timestamp: Utc::now(),
        }
    }

    /// Replace all entity slots.
    pub fn with_entities(mut self, entities: EventEntities) -> Self {
        self.entities = entities;
        self
    }

    /// Set the actor slot.
    pub fn with_actor(mut self, id: impl Into<EntityId>) -> Self {
        self.entities.actor = Some(id.into());
        self
    }

    /// Set the target slot.
    pub fn with_target(mut self, id: impl Into<EntityId>) -> Self {
        self.entities.target = Some(id.into());
        self
    }

    /// Set the instrument slot.
    pub fn with_instrument(mut self, id: impl Into<EntityId>) -> Self {
        self.entities.instrument = Some(id.into());
        self
    }

    /// Set the location slot.
    pub fn with_location(mut self, id: impl Into<EntityId>) -> Self {
        self.entities.location = Some(id.into());
        self
    }

    /// Replace the whole payload.
    pub fn with_data(mut self, data: EventData) -> Self {
        self.data = data;
        self
    }

    /// Add one payload field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Unique id of this event.
    pub fn id(&self) -> EventId {
        self.id
    }

    /// Namespaced type discriminator, e.g. `if.event.taken`.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Entity references.
    pub fn entities(&self) -> &EventEntities {
        &self.entities
    }

    /// The target entity, if any.
    pub fn target(&self) -> Option<&EntityId> {
        self.entities.target.as_ref()
    }

    /// The actor entity, if any.
    pub fn actor(&self) -> Option<&EntityId> {
        self.entities.actor.as_ref()
    }

    /// Event payload.
    pub fn data(&self) -> &EventData {
        &self.data
    }

    /// Creation time.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Check the event type.
    pub fn is(&self, event_type: &str) -> bool {
        self.event_type == event_type
    }

    /// Borrow a raw payload value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Borrow a string payload value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Decode a required payload field.
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> CoreResult<T> {
        self.optional_field(key)?
            .ok_or_else(|| CoreError::MissingField {
                event_type: self.event_type.clone(),
                field: key.to_string(),
            })
    }

    /// Decode an optional payload field. `null` counts as absent.
    pub fn optional_field<T: DeserializeOwned>(&self, key: &str) -> CoreResult<Option<T>> {
        match self.data.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|source| CoreError::InvalidField {
                    event_type: self.event_type.clone(),
                    field: key.to_string(),
                    source,
                }),
        }
    }

    /// The target entity, or an error naming this event.
    pub fn require_target(&self) -> CoreResult<&EntityId> {
        self.entities
            .target
            .as_ref()
            .ok_or_else(|| CoreError::MissingEntity {
                event_type: self.event_type.clone(),
                slot: "target",
            })
    }

    /// The actor entity, or an error naming this event.
    pub fn require_actor(&self) -> CoreResult<&EntityId> {
        self.entities
            .actor
            .as_ref()
            .ok_or_else(|| CoreError::MissingEntity {
                event_type: self.event_type.clone(),
                slot: "actor",
            })
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON, rejecting events without a type.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let event: Self = serde_json::from_str(json)?;
        if event.event_type.is_empty() {
            return Err(CoreError::EmptyEventType);
        }
        Ok(event)
    }
}
