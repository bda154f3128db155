use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tw_core::{EntityId, EventData, SemanticEvent};

/// A declarative change requested by a reaction handler.
///
/// Handlers return effects instead of mutating the world themselves. The
/// processor checks every effect of one event before applying any of them,
/// so a single bad effect rejects the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Add points to the running score. May be negative.
    Score {
        /// Points to add.
        points: i64,
    },
    /// Set a story flag in world state.
    Flag {
        /// Flag name, used as the state key.
        name: String,
        /// New value.
        value: bool,
    },
    /// Ask the text layer to print a message.
    Message {
        /// Message id.
        id: String,
        /// Message parameters.
        #[serde(default)]
        params: EventData,
    },
    /// Queue a follow-up event as a reaction.
    Emit {
        /// The event to process.
        event: SemanticEvent,
    },
    /// Relocate an entity.
    MoveEntity {
        /// The entity to move.
        entity: EntityId,
        /// Where it goes.
        destination: EntityId,
    },
    /// Overwrite properties on an entity.
    UpdateEntity {
        /// The entity to change.
        entity: EntityId,
        /// Property name to new value.
        properties: EventData,
    },
    /// Set a world state value.
    SetState {
        /// State key.
        key: String,
        /// New value.
        value: Value,
    },
    /// Add, redirect, or remove exits of a room. `None` removes the exit.
    UpdateExits {
        /// The room to change.
        room: EntityId,
        /// Direction to destination.
        exits: BTreeMap<String, Option<EntityId>>,
    },
    /// Make an exit unusable without removing it.
    Block {
        /// The room holding the exit.
        room: EntityId,
        /// Direction name.
        exit: String,
    },
    /// Lift a block placed by [`Effect::Block`].
    Unblock {
        /// The room holding the exit.
        room: EntityId,
        /// Direction name.
        exit: String,
    },
    /// Start a daemon after a number of turns.
    Schedule {
        /// Daemon id.
        daemon: String,
        /// Turns to wait. 0 means the next turn.
        turns: u32,
    },
}

impl Effect {
    /// Short name of the variant, as it appears in the `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Score { .. } => "score",
            Self::Flag { .. } => "flag",
            Self::Message { .. } => "message",
            Self::Emit { .. } => "emit",
            Self::MoveEntity { .. } => "move_entity",
            Self::UpdateEntity { .. } => "update_entity",
            Self::SetState { .. } => "set_state",
            Self::UpdateExits { .. } => "update_exits",
            Self::Block { .. } => "block",
            Self::Unblock { .. } => "unblock",
            Self::Schedule { .. } => "schedule",
        }
    }
}

/// One item of what a reaction handler returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Reaction {
    /// A follow-up event, processed at the next depth.
    Event(SemanticEvent),
    /// A change applied atomically with the other effects of the same event.
    Effect(Effect),
}

impl From<SemanticEvent> for Reaction {
    fn from(event: SemanticEvent) -> Self {
        Self::Event(event)
    }
}

impl From<Effect> for Reaction {
    fn from(effect: Effect) -> Self {
        Self::Effect(effect)
    }
}
