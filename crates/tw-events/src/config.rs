use serde::{Deserialize, Serialize};

use crate::error::EventsResult;

/// Configuration for an [`crate::EventProcessor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessorOptions {
    /// Consult the world's validator before applying each event.
    pub validate: bool,
    /// Collect the world's preview of each event into `changes`.
    pub preview: bool,
    /// Reaction levels processed after a top-level event. Deeper reactions are dropped.
    pub max_reaction_depth: usize,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            validate: true,
            preview: false,
            max_reaction_depth: 10,
        }
    }
}

impl ProcessorOptions {
    /// Turn the validation gate on or off.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Turn preview collection on or off.
    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    /// Set the reaction depth bound.
    pub fn with_max_reaction_depth(mut self, depth: usize) -> Self {
        self.max_reaction_depth = depth;
        self
    }

    /// Parse options from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> EventsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_values() {
        let options = ProcessorOptions::default();
        assert!(options.validate);
        assert!(!options.preview);
        assert_eq!(options.max_reaction_depth, 10);
    }

    #[test]
    fn options_builder_chain() {
        let options = ProcessorOptions::default()
            .with_validation(false)
            .with_preview(true)
            .with_max_reaction_depth(2);
        assert!(!options.validate);
        assert!(options.preview);
        assert_eq!(options.max_reaction_depth, 2);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let options = ProcessorOptions::from_json(r#"{"maxReactionDepth": 3}"#).unwrap();
        assert_eq!(options.max_reaction_depth, 3);
        assert!(options.validate);
        assert!(!options.preview);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ProcessorOptions::from_json("{\"validate\": 1}").is_err());
    }
}
