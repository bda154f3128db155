use serde::{Deserialize, Serialize};
use tw_core::EntityId;

/// A player command after parsing and noun resolution.
///
/// Parsing itself happens elsewhere; by the time a command reaches an action
/// its objects are entity ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCommand {
    /// The action to run, e.g. `"if.action.taking"`.
    pub action: String,
    /// The direct object, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_object: Option<EntityId>,
    /// The indirect object, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indirect_object: Option<EntityId>,
    /// The preposition joining the objects, e.g. `"in"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preposition: Option<String>,
    /// The raw input line.
    #[serde(default)]
    pub input: String,
}

impl ParsedCommand {
    /// A command for an action with no objects.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Default::default()
        }
    }

    /// Set the direct object.
    pub fn with_direct_object(mut self, id: impl Into<EntityId>) -> Self {
        self.direct_object = Some(id.into());
        self
    }

    /// Set the indirect object.
    pub fn with_indirect_object(mut self, id: impl Into<EntityId>) -> Self {
        self.indirect_object = Some(id.into());
        self
    }
}
