use serde_json::Value;
use tw_core::{EntityId, SemanticEvent};
use tw_core::types::{CLOSED, LOCKED, OPENED, STATE_CHANGED, TAKEN_OFF, UNLOCKED, WORN};
use tw_world::{Entity, TraitSet, World, WorldChange, WorldResult};

use super::{HandlerRegistry, missing_trait, target, target_exists, target_mut};

/// A boolean trait field driven by a pair of events.
#[derive(Clone, Copy)]
struct Flag {
    trait_name: &'static str,
    field: &'static str,
    read: fn(&TraitSet) -> Option<bool>,
    write: fn(&mut TraitSet, bool, Option<EntityId>) -> bool,
}

const OPEN: Flag = Flag {
    trait_name: "openable",
    field: "isOpen",
    read: |t| t.openable.as_ref().map(|o| o.is_open),
    write: |t, value, _| {
        let Some(openable) = t.openable.as_mut() else {
            return false;
        };
        openable.is_open = value;
        true
    },
};

const LOCK: Flag = Flag {
    trait_name: "lockable",
    field: "isLocked",
    read: |t| t.lockable.as_ref().map(|l| l.is_locked),
    write: |t, value, _| {
        let Some(lockable) = t.lockable.as_mut() else {
            return false;
        };
        lockable.is_locked = value;
        true
    },
};

const WEAR: Flag = Flag {
    trait_name: "wearable",
    field: "isWorn",
    read: |t| t.wearable.as_ref().map(|w| w.is_worn),
    write: |t, value, actor| {
        let Some(wearable) = t.wearable.as_mut() else {
            return false;
        };
        wearable.is_worn = value;
        wearable.worn_by = if value { actor } else { None };
        true
    },
};

pub(crate) fn register(registry: &mut HandlerRegistry) {
    toggle(registry, OPENED, OPEN, true);
    toggle(registry, CLOSED, OPEN, false);
    toggle(registry, LOCKED, LOCK, true);
    toggle(registry, UNLOCKED, LOCK, false);
    toggle(registry, WORN, WEAR, true);
    toggle(registry, TAKEN_OFF, WEAR, false);

    registry
        .handle(STATE_CHANGED, handle_state_changed)
        .validate(STATE_CHANGED, |event, world| {
            target_exists(event, world) && event.get_str("property").is_some()
        })
        .preview(STATE_CHANGED, |event, world| {
            let (Some(entity), Some(property)) = (target(world, event), event.get_str("property")) else {
                return Vec::new();
            };
            let new_value = event.get("newValue").cloned().unwrap_or(Value::Null);
            vec![WorldChange::modified(
                entity.id.clone(),
                property,
                entity.property(property).cloned(),
                new_value,
            )]
        });
}

/// Register handler, validator, and previewer setting `flag` to `value`.
fn toggle(registry: &mut HandlerRegistry, event_type: &'static str, flag: Flag, value: bool) {
    registry
        .handle(event_type, move |event, world| set_flag(event, world, flag, value))
        .validate(event_type, move |event, world| {
            target(world, event).is_some_and(|e| (flag.read)(&e.traits).is_some())
        })
        .preview(event_type, move |event, world| {
            let Some(entity) = target(world, event) else {
                return Vec::new();
            };
            match (flag.read)(&entity.traits) {
                Some(old) => vec![WorldChange::modified(
                    entity.id.clone(),
                    flag.field,
                    Some(Value::Bool(old)),
                    Value::Bool(value),
                )],
                None => Vec::new(),
            }
        });
}

fn set_flag(event: &SemanticEvent, world: &mut World, flag: Flag, value: bool) -> WorldResult<()> {
    let actor = event.actor().cloned();
    let entity = target_mut(world, event)?;
    if (flag.write)(&mut entity.traits, value, actor) {
        Ok(())
    } else {
        Err(missing_trait(&entity.id, flag.trait_name))
    }
}

/// Sets `properties[property] = newValue` on the target.
fn handle_state_changed(event: &SemanticEvent, world: &mut World) -> WorldResult<()> {
    let property: String = event.field("property")?;
    let new_value = event.get("newValue").cloned().unwrap_or(Value::Null);
    let entity: &mut Entity = target_mut(world, event)?;
    entity.properties.insert(property, new_value);
    Ok(())
}
