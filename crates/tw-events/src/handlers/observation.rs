use tw_core::SemanticEvent;
use tw_core::types::{EXAMINED, LOOKED, SEARCHED};
use tw_world::{World, WorldError, WorldModel, WorldResult};

use super::{HandlerRegistry, target_exists, target_mut};

pub(crate) fn register(registry: &mut HandlerRegistry) {
    registry
        .handle(EXAMINED, |event, world| mark(event, world, "examined"))
        .validate(EXAMINED, target_exists);
    registry
        .handle(SEARCHED, |event, world| mark(event, world, "searched"))
        .validate(SEARCHED, target_exists);
    registry.handle(LOOKED, handle_looked);
}

fn mark(event: &SemanticEvent, world: &mut World, property: &str) -> WorldResult<()> {
    target_mut(world, event)?
        .properties
        .insert(property.to_string(), true.into());
    Ok(())
}

/// Marks the room being looked at as visited: the event's location, or the
/// room around the actor.
fn handle_looked(event: &SemanticEvent, world: &mut World) -> WorldResult<()> {
    let room = match event.entities().location.clone() {
        Some(location) => location,
        None => {
            let actor = event.require_actor()?;
            world
                .containing_room(actor)
                .cloned()
                .ok_or_else(|| WorldError::Rejected(format!("{actor} is not in a room")))?
        }
    };
    if !world.has_entity(&room) {
        return Err(WorldError::EntityNotFound(room));
    }
    if let Some(trait_data) = world
        .get_entity_mut(&room)
        .and_then(|e| e.traits.room.as_mut())
    {
        trait_data.visited = true;
    }
    Ok(())
}
