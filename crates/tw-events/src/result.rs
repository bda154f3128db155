use serde::Serialize;
use tw_core::SemanticEvent;
use tw_world::WorldChange;

use crate::effects::EffectError;

/// An event that was rejected or whose application failed.
#[derive(Debug, Clone, Serialize)]
pub struct FailedEvent {
    /// The event as it was submitted.
    pub event: SemanticEvent,
    /// Why it failed.
    pub reason: String,
}

/// Everything one call to [`crate::EventProcessor::process_events`] did.
///
/// `applied` and `failed` never share an event. `reactions` lists every
/// reaction discovered at any depth, including ones that later failed or
/// were cut off by the depth bound.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessedEvents {
    /// Events applied to the world, in application order.
    pub applied: Vec<SemanticEvent>,
    /// Events that failed validation or application.
    pub failed: Vec<FailedEvent>,
    /// Previewed changes of applied events, when preview is on.
    pub changes: Vec<WorldChange>,
    /// Every reaction discovered during processing.
    pub reactions: Vec<SemanticEvent>,
    /// Effect batches that were refused, one entry per offending effect.
    pub rejected_effects: Vec<EffectError>,
}

impl ProcessedEvents {
    /// `true` if nothing failed.
    pub fn all_applied(&self) -> bool {
        self.failed.is_empty()
    }

    /// `true` if an event of the given type was applied.
    pub fn applied_type(&self, event_type: &str) -> bool {
        self.applied.iter().any(|e| e.is(event_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_and_types_are_reported() {
        let result = ProcessedEvents {
            applied: vec![SemanticEvent::new("a"), SemanticEvent::new("b")],
            failed: vec![FailedEvent {
                event: SemanticEvent::new("c"),
                reason: "nope".into(),
            }],
            ..Default::default()
        };
        assert!(!result.all_applied());
        assert!(result.applied_type("b"));
        assert!(!result.applied_type("c"));
        assert!(ProcessedEvents::default().all_applied());
    }
}
