use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tw_core::types::{ACTION_BLOCKED, ACTION_ERROR, ACTION_SUCCESS};
use tw_core::{EntityId, EventData, EventEntities, SemanticEvent};
use tw_world::{World, WorldModel};

use crate::command::ParsedCommand;
use crate::error::{ActionError, ActionResult};
use crate::validation::ValidationResult;

/// Error kind carried by `action.error` events for execute-phase failures.
pub const EXECUTION_FAILED: &str = "execution_failed";

/// Build an [`EventData`] map from key/value pairs.
pub fn event_data<const N: usize>(pairs: [(&str, Value); N]) -> EventData {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Scratch space shared between the phases of one action invocation.
#[derive(Debug, Clone, Default)]
pub struct SharedData {
    values: HashMap<String, Value>,
}

impl SharedData {
    /// Store a value, replacing any earlier one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Read a raw value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Read a string value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Read a value as `T`. `None` if absent or the wrong shape.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// `true` if the key was stored.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// `true` if nothing was stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Everything an action can see and touch during one invocation.
pub struct ActionContext<'a> {
    /// The world being acted on.
    pub world: &'a mut World,
    /// The command being executed.
    pub command: &'a ParsedCommand,
    /// Per-invocation scratch, fresh for every run.
    pub shared: SharedData,
    player: EntityId,
    action_id: &'static str,
}

impl<'a> ActionContext<'a> {
    /// A context with empty shared data.
    pub fn new(
        world: &'a mut World,
        command: &'a ParsedCommand,
        player: EntityId,
        action_id: &'static str,
    ) -> Self {
        Self {
            world,
            command,
            shared: SharedData::default(),
            player,
            action_id,
        }
    }

    /// The acting entity.
    pub fn player(&self) -> &EntityId {
        &self.player
    }

    /// Id of the running action.
    pub fn action_id(&self) -> &'static str {
        self.action_id
    }

    /// The command's direct object, if any.
    pub fn direct_object(&self) -> Option<&EntityId> {
        self.command.direct_object.as_ref()
    }

    /// The command's indirect object, if any.
    pub fn indirect_object(&self) -> Option<&EntityId> {
        self.command.indirect_object.as_ref()
    }

    /// The direct object, or [`ActionError::MissingObject`].
    pub fn require_direct_object(&self) -> ActionResult<EntityId> {
        self.direct_object()
            .cloned()
            .ok_or(ActionError::MissingObject {
                action: self.action_id,
                slot: "direct",
            })
    }

    /// The room the player is in.
    pub fn current_location(&self) -> Option<&EntityId> {
        self.world.containing_room(&self.player)
    }

    /// Display name of an entity, falling back to its id.
    pub fn name_of(&self, id: &EntityId) -> String {
        self.world
            .get_entity(id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// `true` if the player holds `id` or can reach it in the current room
    /// without passing through anything closed.
    pub fn can_reach(&self, id: &EntityId) -> bool {
        let Some(room) = self.current_location() else {
            return false;
        };
        let mut current = self.world.get_location(id);
        while let Some(holder) = current {
            if holder == room || *holder == self.player {
                return true;
            }
            if !self.world.get_entity(holder).is_some_and(|e| e.is_accessible()) {
                return false;
            }
            current = self.world.get_location(holder);
        }
        false
    }

    // -----------------------------------------------------------------------
    // Event factory
    // -----------------------------------------------------------------------

    /// A new event from this command: actor is the player, target the
    /// direct object, instrument the indirect object, location the room.
    pub fn event(&self, event_type: &str, data: EventData) -> SemanticEvent {
        let entities = EventEntities {
            actor: Some(self.player.clone()),
            target: self.command.direct_object.clone(),
            instrument: self.command.indirect_object.clone(),
            location: self.current_location().cloned(),
        };
        SemanticEvent::new(event_type)
            .with_entities(entities)
            .with_data(data)
    }

    /// `action.success` with a message id and its params.
    pub fn success(&self, message_id: &str, params: EventData) -> SemanticEvent {
        self.event(
            ACTION_SUCCESS,
            event_data([
                ("actionId", self.action_id.into()),
                ("messageId", message_id.into()),
                ("params", Value::Object(params)),
            ]),
        )
    }

    /// `action.blocked` for a failed validation.
    pub fn blocked_event(&self, validation: &ValidationResult) -> SemanticEvent {
        self.event(
            ACTION_BLOCKED,
            event_data([
                ("actionId", self.action_id.into()),
                ("error", validation.error.clone().into()),
                ("messageId", validation.message().into()),
                ("params", Value::Object(validation.params.clone())),
            ]),
        )
    }

    /// `action.error` for a failed validation.
    pub fn validation_error(&self, validation: &ValidationResult) -> SemanticEvent {
        self.error_event(
            validation.error.as_deref().unwrap_or("validation_failed"),
            validation.message(),
            validation.params.clone(),
        )
    }

    /// `action.error` of kind `execution_failed`.
    pub fn execution_failed(&self, error: &ActionError) -> SemanticEvent {
        self.error_event(
            EXECUTION_FAILED,
            None,
            event_data([("reason", error.to_string().into())]),
        )
    }

    /// `action.error` with an explicit kind.
    pub fn error_event(&self, kind: &str, message_id: Option<&str>, params: EventData) -> SemanticEvent {
        self.event(
            ACTION_ERROR,
            event_data([
                ("actionId", self.action_id.into()),
                ("error", kind.into()),
                ("messageId", message_id.unwrap_or(kind).into()),
                ("params", Value::Object(params)),
            ]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_world::Entity;

    fn world() -> World {
        let mut world = World::default();
        let hall = world.add_entity(Entity::new("hall", "hall").room()).unwrap();
        world
            .add_entity_at(Entity::new("player", "you").actor(true), &hall)
            .unwrap();
        let open_box = world
            .add_entity_at(Entity::new("basket", "basket").container(None), &hall)
            .unwrap();
        let safe = world
            .add_entity_at(Entity::new("safe", "safe").container(None).openable(false), &hall)
            .unwrap();
        world.add_entity_at(Entity::new("pear", "pear"), &open_box).unwrap();
        world.add_entity_at(Entity::new("gem", "gem"), &safe).unwrap();
        world
    }

    #[test]
    fn event_fills_entities_from_command() {
        let mut world = world();
        let command = ParsedCommand::new("if.action.putting")
            .with_direct_object("pear")
            .with_indirect_object("basket");
        let ctx = ActionContext::new(&mut world, &command, EntityId::from("player"), "if.action.putting");

        let event = ctx.event("if.event.put_in", EventData::new());
        assert_eq!(event.actor(), Some(&EntityId::from("player")));
        assert_eq!(event.target(), Some(&EntityId::from("pear")));
        assert_eq!(event.entities().instrument, Some(EntityId::from("basket")));
        assert_eq!(event.entities().location, Some(EntityId::from("hall")));
    }

    #[test]
    fn reach_stops_at_closed_containers() {
        let mut world = world();
        let command = ParsedCommand::new("x");
        let ctx = ActionContext::new(&mut world, &command, EntityId::from("player"), "x");
        assert!(ctx.can_reach(&EntityId::from("pear")));
        assert!(!ctx.can_reach(&EntityId::from("gem")));
        assert!(ctx.can_reach(&EntityId::from("safe")));
    }

    #[test]
    fn blocked_event_uses_message_id_then_error() {
        let mut world = world();
        let command = ParsedCommand::new("if.action.taking");
        let ctx = ActionContext::new(&mut world, &command, EntityId::from("player"), "if.action.taking");

        let event = ctx.blocked_event(&ValidationResult::invalid("fixed_in_place"));
        assert_eq!(event.get_str("messageId"), Some("fixed_in_place"));
        assert_eq!(event.get_str("actionId"), Some("if.action.taking"));

        let event = ctx.blocked_event(
            &ValidationResult::invalid("fixed_in_place").with_message_id("bolted_down"),
        );
        assert_eq!(event.get_str("messageId"), Some("bolted_down"));
        assert_eq!(event.get_str("error"), Some("fixed_in_place"));
    }

    #[test]
    fn execution_failed_carries_reason() {
        let mut world = world();
        let command = ParsedCommand::new("x");
        let ctx = ActionContext::new(&mut world, &command, EntityId::from("player"), "x");
        let event = ctx.execution_failed(&ActionError::Failed("jammed".into()));
        assert!(event.is(ACTION_ERROR));
        assert_eq!(event.get_str("error"), Some(EXECUTION_FAILED));
        assert_eq!(event.get("params").and_then(|p| p.get("reason")), Some(&Value::from("jammed")));
    }

    #[test]
    fn shared_data_reads_typed_values() {
        let mut shared = SharedData::default();
        assert!(shared.is_empty());
        shared.insert("previousLocation", "hall");
        shared.insert("count", 3);
        assert_eq!(shared.get_str("previousLocation"), Some("hall"));
        assert_eq!(shared.get_as::<EntityId>("previousLocation"), Some(EntityId::from("hall")));
        assert_eq!(shared.get_as::<u32>("count"), Some(3));
        assert!(shared.get_as::<String>("count").is_none());
        assert!(shared.contains("count"));
    }
}
