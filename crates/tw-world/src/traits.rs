use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tw_core::EntityId;

/// The set of trait data attached to an entity.
/// Entities can hold any combination; absence means the entity lacks the behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitSet {
    /// A place the player can be in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomTrait>,
    /// Something that acts, the player included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<ActorTrait>,
    /// Holds things inside it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerTrait>,
    /// Holds things on top of it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supporter: Option<SupporterTrait>,
    /// Can be opened and closed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openable: Option<OpenableTrait>,
    /// Can be locked and unlocked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lockable: Option<LockableTrait>,
    /// Can be switched on and off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switchable: Option<SwitchableTrait>,
    /// Can be worn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wearable: Option<WearableTrait>,
    /// Fixed in place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenery: Option<SceneryTrait>,
    /// Can be eaten.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edible: Option<EdibleTrait>,
}

// ---------------------------------------------------------------------------
// Places and people
// ---------------------------------------------------------------------------

/// Room data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomTrait {
    /// The player has been here.
    pub visited: bool,
    /// Nothing can be seen without a light source.
    pub dark: bool,
    /// Direction name to destination room.
    pub exits: BTreeMap<String, EntityId>,
    /// Exits that exist but cannot currently be used.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub blocked_exits: BTreeSet<String>,
}

impl RoomTrait {
    /// Where an exit leads, unless it is missing or blocked.
    pub fn open_exit(&self, direction: &str) -> Option<&EntityId> {
        if self.blocked_exits.contains(direction) {
            return None;
        }
        self.exits.get(direction)
    }
}

/// Actor data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorTrait {
    /// This actor is the one the player controls.
    pub is_player: bool,
}

// ---------------------------------------------------------------------------
// Holding things
// ---------------------------------------------------------------------------

/// Container data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerTrait {
    /// Maximum number of direct contents. `None` = unlimited.
    pub capacity: Option<usize>,
}

/// Supporter data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupporterTrait {
    /// Maximum number of things on top. `None` = unlimited.
    pub capacity: Option<usize>,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Open/closed state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenableTrait {
    /// Currently open.
    pub is_open: bool,
}

/// Lock state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LockableTrait {
    /// Currently locked.
    pub is_locked: bool,
    /// The key that fits, if any.
    pub key_id: Option<EntityId>,
}

/// On/off state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchableTrait {
    /// Currently on.
    pub is_on: bool,
}

/// Wearable state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WearableTrait {
    /// Currently worn.
    pub is_worn: bool,
    /// Who is wearing it.
    pub worn_by: Option<EntityId>,
}

// ---------------------------------------------------------------------------
// Fixtures and consumables
// ---------------------------------------------------------------------------

/// Scenery data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneryTrait {
    /// Custom refusal used by the taking action instead of `fixed_in_place`.
    pub cant_take_message: Option<String>,
}

/// Edible data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdibleTrait {
    /// Servings left. The last one removes the entity.
    pub servings: u32,
}

impl Default for EdibleTrait {
    fn default() -> Self {
        Self { servings: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_trait_set_serializes_to_empty_object() {
        let json = serde_json::to_string(&TraitSet::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn trait_set_round_trips_openable_state() {
        let traits = TraitSet {
            openable: Some(OpenableTrait { is_open: true }),
            ..Default::default()
        };
        let json = serde_json::to_string(&traits).unwrap();
        let back: TraitSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back.openable, Some(OpenableTrait { is_open: true }));
        assert!(back.switchable.is_none());
    }

    #[test]
    fn blocked_exit_is_not_open() {
        let mut room = RoomTrait::default();
        room.exits.insert("north".into(), EntityId::from("cellar"));
        room.exits.insert("east".into(), EntityId::from("garden"));
        room.blocked_exits.insert("east".into());
        assert_eq!(room.open_exit("north"), Some(&EntityId::from("cellar")));
        assert_eq!(room.open_exit("east"), None);
        assert_eq!(room.open_exit("west"), None);
    }

    #[test]
    fn edible_defaults_to_one_serving() {
        assert_eq!(EdibleTrait::default().servings, 1);
    }
}
