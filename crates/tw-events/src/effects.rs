use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use tracing::trace;
use tw_core::types::GAME_MESSAGE;
use tw_core::{EntityId, SemanticEvent};
use tw_world::traits::RoomTrait;
use tw_world::{Effect, WorldError, WorldModel, WorldResult};

use crate::handlers::meta::{SCORE_KEY, current_score, score_overflow};

/// World state key prefix under which scheduled daemons are recorded.
pub const SCHEDULE_PREFIX: &str = "schedule.";

/// An effect that kept its batch from being applied.
#[derive(Debug, Clone, Serialize)]
pub struct EffectError {
    /// The offending effect.
    pub effect: Effect,
    /// Why it was refused.
    pub reason: String,
}

/// Applies the effects produced for one event as a single batch.
///
/// Every effect is checked before any is applied. Checking tracks the
/// batch's own score, moves, and exit edits, so a later effect sees what an
/// earlier one in the same batch would do. If any check fails nothing is
/// applied and every refusal is returned.
pub struct EffectProcessor<'w, W: WorldModel> {
    world: &'w mut W,
}

/// What the batch would have done so far, as seen by the checks.
#[derive(Default)]
struct Pending {
    score: Option<i64>,
    locations: HashMap<EntityId, EntityId>,
    exits: HashMap<(EntityId, String), bool>,
}

impl<'w, W: WorldModel> EffectProcessor<'w, W> {
    /// Borrow the world for one batch.
    pub fn new(world: &'w mut W) -> Self {
        Self { world }
    }

    /// Check and apply a batch. On success returns the events the batch
    /// emitted, in effect order.
    pub fn process(&mut self, effects: Vec<Effect>) -> Result<Vec<SemanticEvent>, Vec<EffectError>> {
        let errors = self.validate(&effects);
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut emitted = Vec::new();
        for effect in effects {
            if let Err(err) = self.apply(&effect, &mut emitted) {
                return Err(vec![EffectError {
                    reason: err.to_string(),
                    effect,
                }]);
            }
            trace!(kind = effect.kind(), "effect applied");
        }
        Ok(emitted)
    }

    /// Check a batch without applying it. Empty means it would apply.
    pub fn validate(&self, effects: &[Effect]) -> Vec<EffectError> {
        let mut pending = Pending::default();
        effects
            .iter()
            .filter_map(|effect| {
                self.check(effect, &mut pending)
                    .err()
                    .map(|err| EffectError {
                        effect: effect.clone(),
                        reason: err.to_string(),
                    })
            })
            .collect()
    }

    fn check(&self, effect: &Effect, pending: &mut Pending) -> WorldResult<()> {
        match effect {
            Effect::Score { points } => {
                let current = pending.score.unwrap_or_else(|| current_score(&*self.world));
                pending.score = Some(current.checked_add(*points).ok_or_else(score_overflow)?);
            }
            Effect::Flag { name, .. } => not_empty(name, "flag name")?,
            Effect::Message { id, .. } => not_empty(id, "message id")?,
            Effect::Emit { event } => not_empty(event.event_type(), "event type")?,
            Effect::MoveEntity {
                entity,
                destination,
            } => {
                self.require(entity)?;
                if !self.world.has_entity(destination) {
                    return Err(WorldError::DestinationNotFound(destination.clone()));
                }
                if entity == destination || self.is_within(destination, entity, &pending.locations) {
                    return Err(WorldError::WouldCreateLoop {
                        entity: entity.clone(),
                        destination: destination.clone(),
                    });
                }
                pending.locations.insert(entity.clone(), destination.clone());
            }
            Effect::UpdateEntity { entity, .. } => self.require(entity)?,
            Effect::SetState { key, .. } => not_empty(key, "state key")?,
            Effect::UpdateExits { room, exits } => {
                self.require_room(room)?;
                for (direction, destination) in exits {
                    if let Some(missing) = destination.as_ref().filter(|d| !self.world.has_entity(d)) {
                        return Err(WorldError::DestinationNotFound(missing.clone()));
                    }
                    pending
                        .exits
                        .insert((room.clone(), direction.clone()), destination.is_some());
                }
            }
            Effect::Block { room, exit } | Effect::Unblock { room, exit } => {
                let exits = &self.require_room(room)?.exits;
                let exists = pending
                    .exits
                    .get(&(room.clone(), exit.clone()))
                    .copied()
                    .unwrap_or_else(|| exits.contains_key(exit));
                if !exists {
                    return Err(WorldError::Rejected(format!("{room} has no exit {exit}")));
                }
            }
            Effect::Schedule { daemon, .. } => not_empty(daemon, "daemon id")?,
        }
        Ok(())
    }

    fn apply(&mut self, effect: &Effect, emitted: &mut Vec<SemanticEvent>) -> WorldResult<()> {
        match effect {
            Effect::Score { points } => {
                let score = current_score(&*self.world)
                    .checked_add(*points)
                    .ok_or_else(score_overflow)?;
                self.world.set_state_value(SCORE_KEY.to_string(), Value::from(score));
            }
            Effect::Flag { name, value } => {
                self.world.set_state_value(name.clone(), Value::Bool(*value));
            }
            Effect::Message { id, params } => emitted.push(
                SemanticEvent::new(GAME_MESSAGE)
                    .with_field("messageId", id.as_str())
                    .with_field("params", Value::Object(params.clone())),
            ),
            Effect::Emit { event } => emitted.push(event.clone()),
            Effect::MoveEntity {
                entity,
                destination,
            } => self.world.move_entity(entity, destination)?,
            Effect::UpdateEntity { entity, properties } => {
                self.world.update_entity(entity, |target| {
                    target
                        .properties
                        .extend(properties.iter().map(|(k, v)| (k.clone(), v.clone())));
                })?;
            }
            Effect::SetState { key, value } => {
                self.world.set_state_value(key.clone(), value.clone());
            }
            Effect::UpdateExits { room, exits } => {
                self.world.update_entity(room, |target| {
                    let Some(data) = target.traits.room.as_mut() else {
                        return;
                    };
                    for (direction, destination) in exits {
                        match destination {
                            Some(destination) => {
                                data.exits.insert(direction.clone(), destination.clone());
                            }
                            None => {
                                data.exits.remove(direction);
                                data.blocked_exits.remove(direction);
                            }
                        }
                    }
                })?;
            }
            Effect::Block { room, exit } => {
                self.world.update_entity(room, |target| {
                    if let Some(data) = target.traits.room.as_mut() {
                        data.blocked_exits.insert(exit.clone());
                    }
                })?;
            }
            Effect::Unblock { room, exit } => {
                self.world.update_entity(room, |target| {
                    if let Some(data) = target.traits.room.as_mut() {
                        data.blocked_exits.remove(exit);
                    }
                })?;
            }
            Effect::Schedule { daemon, turns } => {
                self.world
                    .set_state_value(format!("{SCHEDULE_PREFIX}{daemon}"), Value::from(*turns));
            }
        }
        Ok(())
    }

    fn require(&self, id: &EntityId) -> WorldResult<()> {
        if self.world.has_entity(id) {
            Ok(())
        } else {
            Err(WorldError::EntityNotFound(id.clone()))
        }
    }

    fn require_room(&self, id: &EntityId) -> WorldResult<&RoomTrait> {
        self.world
            .get_entity(id)
            .ok_or_else(|| WorldError::EntityNotFound(id.clone()))?
            .traits
            .room
            .as_ref()
            .ok_or_else(|| WorldError::MissingTrait {
                entity: id.clone(),
                trait_name: "a room",
            })
    }

    /// `true` if `id` sits somewhere inside `ancestor`, counting moves the
    /// batch has already made.
    fn is_within(&self, id: &EntityId, ancestor: &EntityId, moved: &HashMap<EntityId, EntityId>) -> bool {
        let location = |of: &EntityId| moved.get(of).or_else(|| self.world.get_location(of));
        let mut current = location(id);
        while let Some(at) = current {
            if at == ancestor {
                return true;
            }
            current = location(at);
        }
        false
    }
}

fn not_empty(value: &str, what: &str) -> WorldResult<()> {
    if value.is_empty() {
        Err(WorldError::Rejected(format!("{what} is empty")))
    } else {
        Ok(())
    }
}
