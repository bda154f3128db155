use std::collections::BTreeMap;

use crate::action::{ActionKind, ActionMetadata};
use crate::actions;

/// Actions keyed by id.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    actions: BTreeMap<&'static str, ActionKind>,
}

impl ActionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every standard action.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for action in actions::standard_actions() {
            registry.register(action);
        }
        registry
    }

    /// Add an action, returning the one it replaced.
    pub fn register(&mut self, action: ActionKind) -> Option<ActionKind> {
        self.actions.insert(action.id(), action)
    }

    /// Remove an action by id.
    pub fn unregister(&mut self, id: &str) -> Option<ActionKind> {
        self.actions.remove(id)
    }

    /// Look an action up by id.
    pub fn get(&self, id: &str) -> Option<&ActionKind> {
        self.actions.get(id)
    }

    /// `true` if an action with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.actions.contains_key(id)
    }

    /// Metadata of every action, sorted by id.
    pub fn metadata(&self) -> impl Iterator<Item = &ActionMetadata> {
        self.actions.values().map(ActionKind::metadata)
    }

    /// Metadata of the actions in one group.
    pub fn in_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a ActionMetadata> + 'a {
        self.metadata().filter(move |m| m.group == group)
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
