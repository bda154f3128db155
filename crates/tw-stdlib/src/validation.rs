use serde::{Deserialize, Serialize};
use serde_json::Value;
use tw_core::EventData;

/// Outcome of an action's validate phase. Failure is data, not an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Whether the action may execute.
    pub valid: bool,
    /// Error kind on failure, e.g. `"fixed_in_place"`. Opaque to the driver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Message to render instead of the error kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Values for the message template.
    #[serde(default, skip_serializing_if = "EventData::is_empty")]
    pub params: EventData,
}

impl ValidationResult {
    /// A passing result.
    pub fn ok() -> Self {
        Self {
            valid: true,
            ..Default::default()
        }
    }

    /// A failing result with an error kind.
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Name the message the text layer should show.
    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    /// Add a message parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// The message to show: `message_id` if set, else the error kind.
    pub fn message(&self) -> Option<&str> {
        self.message_id.as_deref().or(self.error.as_deref())
    }
}
