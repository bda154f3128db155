use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tw_core::SemanticEvent;
use tw_world::{HandlerResult, Reaction};

/// Story-level reaction callback. Runs for every applied event of its type,
/// targeted or not.
pub type StoryHandler<W> =
    Arc<dyn Fn(&SemanticEvent, &mut W) -> HandlerResult<Vec<Reaction>> + Send + Sync>;

/// Wrap a closure as a [`StoryHandler`].
pub fn story_handler<W, F>(handler: F) -> StoryHandler<W>
where
    F: Fn(&SemanticEvent, &mut W) -> HandlerResult<Vec<Reaction>> + Send + Sync + 'static,
{
    Arc::new(handler)
}

/// Handle returned by registration, used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(pub u64);

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler#{}", self.0)
    }
}

/// Story handlers keyed by event type, each list in registration order.
pub struct StoryHandlers<W> {
    by_type: HashMap<String, Vec<(HandlerId, StoryHandler<W>)>>,
    next_id: u64,
}

impl<W> Default for StoryHandlers<W> {
    fn default() -> Self {
        Self {
            by_type: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<W> fmt::Debug for StoryHandlers<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<(&String, usize)> =
            self.by_type.iter().map(|(k, v)| (k, v.len())).collect();
        types.sort();
        f.debug_map().entries(types).finish()
    }
}

impl<W> StoryHandlers<W> {
    /// Append a handler for an event type.
    pub fn register(&mut self, event_type: impl Into<String>, handler: StoryHandler<W>) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.by_type
            .entry(event_type.into())
            .or_default()
            .push((id, handler));
        id
    }

    /// Remove one handler. The type's entry goes away with its last handler.
    pub fn unregister(&mut self, event_type: &str, id: HandlerId) -> bool {
        let Some(list) = self.by_type.get_mut(event_type) else {
            return false;
        };
        let before = list.len();
        list.retain(|(h, _)| *h != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.by_type.remove(event_type);
        }
        removed
    }

    /// Snapshot of the handlers for a type, so they can run against `&mut W`.
    pub fn for_type(&self, event_type: &str) -> Vec<StoryHandler<W>> {
        self.by_type
            .get(event_type)
            .map(|list| list.iter().map(|(_, h)| Arc::clone(h)).collect())
            .unwrap_or_default()
    }

    /// `true` if any handler is registered for the type.
    pub fn has(&self, event_type: &str) -> bool {
        self.by_type.contains_key(event_type)
    }

    /// Total number of registered handlers.
    pub fn len(&self) -> usize {
        self.by_type.values().map(Vec::len).sum()
    }

    /// `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}
