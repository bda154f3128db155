use serde_json::Value;
use tw_core::SemanticEvent;
use tw_core::types::{DESTROYED, EATEN, PULLED, PUSHED, TURNED};
use tw_world::{World, WorldChange, WorldError, WorldModel, WorldResult};

use super::{HandlerRegistry, missing_trait, target, target_exists, target_mut};

pub(crate) fn register(registry: &mut HandlerRegistry) {
    for (event_type, counter) in [(PUSHED, "timesPushed"), (PULLED, "timesPulled"), (TURNED, "timesTurned")] {
        registry
            .handle(event_type, move |event, world| bump(event, world, counter))
            .validate(event_type, target_exists);
    }

    registry
        .handle(EATEN, handle_eaten)
        .validate(EATEN, |event, world| {
            target(world, event).is_some_and(|e| e.traits.edible.is_some())
        })
        .preview(EATEN, |event, world| {
            let Some(entity) = target(world, event) else {
                return Vec::new();
            };
            match &entity.traits.edible {
                Some(edible) if edible.servings <= 1 => vec![WorldChange::deleted(entity.id.clone())],
                Some(edible) => vec![WorldChange::modified(
                    entity.id.clone(),
                    "servings",
                    Some(edible.servings.into()),
                    (edible.servings - 1).into(),
                )],
                None => Vec::new(),
            }
        });

    registry
        .handle(DESTROYED, |event, world| {
            world.remove_entity(event.require_target()?)?;
            Ok(())
        })
        .validate(DESTROYED, target_exists)
        .preview(DESTROYED, |event, world| {
            target(world, event)
                .map(|e| WorldChange::deleted(e.id.clone()))
                .into_iter()
                .collect()
        });
}

/// Increments an integer counter property on the target.
fn bump(event: &SemanticEvent, world: &mut World, counter: &str) -> WorldResult<()> {
    let entity = target_mut(world, event)?;
    let count = entity
        .property(counter)
        .and_then(Value::as_u64)
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| WorldError::Rejected(format!("{counter} overflow")))?;
    entity.properties.insert(counter.to_string(), count.into());
    Ok(())
}

/// One serving is consumed; the last serving removes the entity.
fn handle_eaten(event: &SemanticEvent, world: &mut World) -> WorldResult<()> {
    let entity = target_mut(world, event)?;
    let Some(edible) = entity.traits.edible.as_mut() else {
        return Err(missing_trait(&entity.id, "edible"));
    };
    if edible.servings > 1 {
        edible.servings -= 1;
        return Ok(());
    }
    let id = entity.id.clone();
    world.remove_entity(&id)?;
    Ok(())
}
