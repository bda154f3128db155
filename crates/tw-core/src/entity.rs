use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an entity in the world.
///
/// Story content names its objects (`"brass_lamp"`, `"door1"`), so ids are
/// strings rather than generated values. Events hold ids, never entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Create an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_raw_id() {
        assert_eq!(EntityId::new("brass_lamp").to_string(), "brass_lamp");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = EntityId::from("door1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"door1\"");
        let back: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
