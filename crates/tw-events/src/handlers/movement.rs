use tw_core::types::{ACTOR_MOVED, DROPPED, PUT_IN, PUT_ON, REMOVED, TAKEN};
use tw_core::{EntityId, SemanticEvent};
use tw_world::{World, WorldChange, WorldError, WorldModel, WorldResult};

use super::{HandlerRegistry, target_exists};

pub(crate) fn register(registry: &mut HandlerRegistry) {
    registry
        .handle(TAKEN, handle_taken)
        .validate(TAKEN, actor_and_target_exist)
        .preview(TAKEN, |event, world| {
            preview_move(event, world, event.actor().cloned())
        });

    registry
        .handle(DROPPED, handle_dropped)
        .validate(DROPPED, target_exists)
        .preview(DROPPED, |event, world| {
            preview_move(event, world, drop_destination(event, world).ok())
        });

    for event_type in [PUT_IN, PUT_ON] {
        registry
            .handle(event_type, handle_put)
            .validate(event_type, |event, world| {
                target_exists(event, world) && placement_destination(event).is_some_and(|d| world.has_entity(&d))
            })
            .preview(event_type, |event, world| {
                preview_move(event, world, placement_destination(event))
            });
    }

    registry
        .handle(REMOVED, handle_taken)
        .validate(REMOVED, actor_and_target_exist)
        .preview(REMOVED, |event, world| {
            preview_move(event, world, event.actor().cloned())
        });

    registry
        .handle(ACTOR_MOVED, handle_actor_moved)
        .validate(ACTOR_MOVED, |event, world| {
            event.actor().is_some_and(|a| world.has_entity(a))
                && placement_destination(event).is_some_and(|d| world.has_entity(&d))
        });
}

fn actor_and_target_exist(event: &SemanticEvent, world: &World) -> bool {
    target_exists(event, world) && event.actor().is_some_and(|a| world.has_entity(a))
}

/// The target ends up held by the actor.
fn handle_taken(event: &SemanticEvent, world: &mut World) -> WorldResult<()> {
    let item = event.require_target()?;
    let actor = event.require_actor()?;
    world.move_entity(item, actor)
}

/// The target ends up in the event's location, or wherever the actor is.
fn handle_dropped(event: &SemanticEvent, world: &mut World) -> WorldResult<()> {
    let item = event.require_target()?;
    let destination = drop_destination(event, world)?;
    world.move_entity(item, &destination)
}

fn handle_put(event: &SemanticEvent, world: &mut World) -> WorldResult<()> {
    let item = event.require_target()?;
    let destination = placement_destination(event).ok_or_else(|| {
        WorldError::Rejected(format!("{} has no destination", event.event_type()))
    })?;
    world.move_entity(item, &destination)
}

fn handle_actor_moved(event: &SemanticEvent, world: &mut World) -> WorldResult<()> {
    let actor = event.require_actor()?;
    let destination = placement_destination(event)
        .ok_or_else(|| WorldError::Rejected("actor moved without a destination".into()))?;
    world.move_entity(actor, &destination)?;
    if let Some(room) = world
        .get_entity_mut(&destination)
        .and_then(|e| e.traits.room.as_mut())
    {
        room.visited = true;
    }
    Ok(())
}

fn drop_destination(event: &SemanticEvent, world: &World) -> WorldResult<EntityId> {
    if let Some(location) = event.entities().location.clone() {
        return Ok(location);
    }
    let actor = event.require_actor()?;
    world
        .get_location(actor)
        .cloned()
        .ok_or_else(|| WorldError::Rejected(format!("{actor} is nowhere to drop things")))
}

/// `entities.location`, falling back to a `destination` data field.
fn placement_destination(event: &SemanticEvent) -> Option<EntityId> {
    event
        .entities()
        .location
        .clone()
        .or_else(|| event.get_str("destination").map(EntityId::from))
}

fn preview_move(event: &SemanticEvent, world: &World, to: Option<EntityId>) -> Vec<WorldChange> {
    match (event.target(), to) {
        (Some(item), Some(to)) => vec![WorldChange::moved(item.clone(), world.get_location(item), &to)],
        _ => Vec::new(),
    }
}
