use tw_core::SemanticEvent;
use tw_core::types::{SWITCHED_OFF, SWITCHED_ON};
use tw_world::{World, WorldChange, WorldResult};

use super::{HandlerRegistry, missing_trait, target, target_mut};

pub(crate) fn register(registry: &mut HandlerRegistry) {
    for (event_type, on) in [(SWITCHED_ON, true), (SWITCHED_OFF, false)] {
        registry
            .handle(event_type, move |event, world| switch(event, world, on))
            .validate(event_type, |event, world| {
                target(world, event).is_some_and(|e| e.traits.switchable.is_some())
            })
            .preview(event_type, move |event, world| {
                target(world, event)
                    .and_then(|e| {
                        let switchable = e.traits.switchable.as_ref()?;
                        Some(WorldChange::modified(
                            e.id.clone(),
                            "isOn",
                            Some(switchable.is_on.into()),
                            on.into(),
                        ))
                    })
                    .into_iter()
                    .collect()
            });
    }
}

fn switch(event: &SemanticEvent, world: &mut World, on: bool) -> WorldResult<()> {
    let entity = target_mut(world, event)?;
    match entity.traits.switchable.as_mut() {
        Some(switchable) => {
            switchable.is_on = on;
            Ok(())
        }
        None => Err(missing_trait(&entity.id, "switchable")),
    }
}
