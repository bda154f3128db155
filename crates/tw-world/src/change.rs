use serde::{Deserialize, Serialize};
use serde_json::Value;
use tw_core::EntityId;

/// What sort of change a [`WorldChange`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// An entity changed location.
    Move,
    /// An entity was added.
    Create,
    /// An entity was removed.
    Delete,
    /// A field of an entity changed.
    Modify,
    /// A relation was added.
    Relate,
    /// A relation was removed.
    Unrelate,
}

/// A description of something an event would change, produced by previewers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldChange {
    /// The kind of change.
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    /// The entity affected.
    pub entity_id: EntityId,
    /// The field affected, for modifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Value before the change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    /// Value after the change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
}

impl WorldChange {
    /// A change of location from `from` to `to`.
    pub fn moved(entity_id: EntityId, from: Option<&EntityId>, to: &EntityId) -> Self {
        Self {
            kind: ChangeKind::Move,
            entity_id,
            field: Some("location".to_string()),
            old_value: from.map(|id| Value::String(id.to_string())),
            new_value: Some(Value::String(to.to_string())),
        }
    }

    /// A field modification.
    pub fn modified(
        entity_id: EntityId,
        field: impl Into<String>,
        old_value: Option<Value>,
        new_value: Value,
    ) -> Self {
        Self {
            kind: ChangeKind::Modify,
            entity_id,
            field: Some(field.into()),
            old_value,
            new_value: Some(new_value),
        }
    }

    /// Removal of an entity.
    pub fn deleted(entity_id: EntityId) -> Self {
        Self {
            kind: ChangeKind::Delete,
            entity_id,
            field: None,
            old_value: None,
            new_value: None,
        }
    }
}
