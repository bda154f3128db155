use tw_core::SemanticEvent;
use tw_core::types::DROPPED;
use tw_world::{WorldError, WorldModel};

use super::{DROPPING, report_failure};
use crate::action::{Action, ActionMetadata};
use crate::context::{ActionContext, event_data};
use crate::error::{ActionError, ActionResult};
use crate::validation::ValidationResult;

const METADATA: ActionMetadata = ActionMetadata {
    id: DROPPING,
    group: "object_manipulation",
    required_messages: &["no_target", "not_held", "dropped"],
    requires_direct_object: true,
    requires_indirect_object: false,
};

/// Put something held down in the current room.
#[derive(Debug, Clone, Copy)]
pub struct DroppingAction;

impl Action for DroppingAction {
    fn metadata(&self) -> &ActionMetadata {
        &METADATA
    }

    fn validate(&self, ctx: &ActionContext<'_>) -> ValidationResult {
        let Some(item) = ctx.direct_object().and_then(|id| ctx.world.get_entity(id)) else {
            return ValidationResult::invalid("no_target");
        };
        if ctx.world.get_location(&item.id) != Some(ctx.player()) {
            return ValidationResult::invalid("not_held").with_param("item", item.name.clone());
        }
        ValidationResult::ok().with_param("item", item.name.clone())
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult<()> {
        let item = ctx.require_direct_object()?;
        let room = ctx
            .current_location()
            .cloned()
            .ok_or_else(|| WorldError::EntityNotFound(ctx.player().clone()))?;
        ctx.world.move_entity(&item, &room)?;
        Ok(())
    }

    fn report(
        &self,
        ctx: &ActionContext<'_>,
        validation: Option<&ValidationResult>,
        error: Option<&ActionError>,
    ) -> Vec<SemanticEvent> {
        if let Some(events) = report_failure(ctx, validation, error) {
            return events;
        }
        let Some(item) = ctx.direct_object() else {
            return vec![ctx.error_event("no_target", None, Default::default())];
        };
        let name = ctx.name_of(item);
        vec![
            ctx.event(
                DROPPED,
                event_data([
                    ("item", name.clone().into()),
                    ("itemId", item.as_str().into()),
                    ("actorId", ctx.player().as_str().into()),
                ]),
            ),
            ctx.success("dropped", event_data([("item", name.into())])),
        ]
    }

    fn blocked(&self, ctx: &ActionContext<'_>, validation: &ValidationResult) -> Option<Vec<SemanticEvent>> {
        Some(vec![ctx.blocked_event(validation)])
    }
}
