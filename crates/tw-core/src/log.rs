use chrono::{DateTime, Utc};

use crate::entity::EntityId;
use crate::event::SemanticEvent;

/// Bounded history of events, oldest first.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<SemanticEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a log holding at most `max_events` entries (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: SemanticEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// All recorded events.
    pub fn events(&self) -> &[SemanticEvent] {
        &self.events
    }

    /// Events created strictly after `timestamp`.
    pub fn events_since(&self, timestamp: DateTime<Utc>) -> Vec<&SemanticEvent> {
        self.events
            .iter()
            .filter(|e| e.timestamp() > timestamp)
            .collect()
    }

    /// Events of one type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<&SemanticEvent> {
        self.events.iter().filter(|e| e.is(event_type)).collect()
    }

    /// Events that reference the entity in any slot.
    pub fn events_for_entity(&self, id: &EntityId) -> Vec<&SemanticEvent> {
        self.events
            .iter()
            .filter(|e| {
                let entities = e.entities();
                [
                    &entities.actor,
                    &entities.target,
                    &entities.instrument,
                    &entities.location,
                ]
                .into_iter()
                .any(|slot| slot.as_ref() == Some(id))
            })
            .collect()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Forget every recorded event.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_query_by_type() {
        let mut log = EventLog::new(0);
        log.push(SemanticEvent::new("if.event.taken").with_target("lamp"));
        log.push(SemanticEvent::new("if.event.dropped").with_target("lamp"));
        assert_eq!(log.len(), 2);
        assert_eq!(log.events_of_type("if.event.taken").len(), 1);
        assert_eq!(log.events_of_type("if.event.opened").len(), 0);
    }

    #[test]
    fn max_events_trims_oldest() {
        let mut log = EventLog::new(2);
        for kind in ["a", "b", "c", "d"] {
            log.push(SemanticEvent::new(kind));
        }
        assert_eq!(log.len(), 2);
        assert!(log.events()[0].is("c"));
        assert!(log.events()[1].is("d"));
    }

    #[test]
    fn unlimited_capacity_keeps_everything() {
        let mut log = EventLog::new(0);
        for _ in 0..1500 {
            log.push(SemanticEvent::new("tick"));
        }
        assert_eq!(log.len(), 1500);
    }

    #[test]
    fn events_for_entity_checks_every_slot() {
        let player = EntityId::from("player");
        let mut log = EventLog::new(0);
        log.push(SemanticEvent::new("a").with_actor("player"));
        log.push(SemanticEvent::new("b").with_target("player"));
        log.push(SemanticEvent::new("c").with_location("player"));
        log.push(SemanticEvent::new("d").with_target("lamp"));
        assert_eq!(log.events_for_entity(&player).len(), 3);
    }

    #[test]
    fn events_since_excludes_earlier() {
        let mut log = EventLog::new(0);
        let first = SemanticEvent::new("first");
        let cutoff = first.timestamp();
        log.push(first);
        std::thread::sleep(std::time::Duration::from_millis(2));
        log.push(SemanticEvent::new("second"));
        let since = log.events_since(cutoff);
        assert_eq!(since.len(), 1);
        assert!(since[0].is("second"));
    }

    #[test]
    fn clear_empties_log() {
        let mut log = EventLog::new(0);
        log.push(SemanticEvent::new("x"));
        log.clear();
        assert!(log.is_empty());
    }
}
