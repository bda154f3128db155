use tracing::error;
use tw_core::SemanticEvent;
use tw_world::{EntityHandler, Reaction, WorldModel};

/// Run the target entity's handlers for this event and collect their reactions.
///
/// Untargeted events, missing targets, and entities with no handler for the
/// type yield nothing. A failing handler is logged and contributes nothing;
/// later handlers on the same entity still run.
pub fn invoke_entity_handlers<W: WorldModel>(event: &SemanticEvent, world: &mut W) -> Vec<Reaction> {
    let Some(target) = event.target() else {
        return Vec::new();
    };
    let Some(handlers) = world.entity_handlers(target, event.event_type()) else {
        return Vec::new();
    };
    run_isolated(&handlers, event, world, "entity")
}

/// Call each handler in order, concatenating reactions and logging failures.
pub(crate) fn run_isolated<W>(
    handlers: &[EntityHandler<W>],
    event: &SemanticEvent,
    world: &mut W,
    scope: &'static str,
) -> Vec<Reaction> {
    let mut reactions = Vec::new();
    for handler in handlers {
        match handler(event, world) {
            Ok(produced) => reactions.extend(produced),
            Err(err) => error!(
                scope,
                event_type = event.event_type(),
                target = event.target().map(|t| t.as_str()),
                error = %err,
                "event handler failed"
            ),
        }
    }
    reactions
}
