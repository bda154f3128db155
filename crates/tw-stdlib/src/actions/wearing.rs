use tw_core::SemanticEvent;
use tw_core::types::WORN;
use tw_world::WorldModel;

use super::{WEARING, report_failure};
use crate::action::{Action, ActionMetadata};
use crate::context::{ActionContext, event_data};
use crate::error::{ActionError, ActionResult};
use crate::validation::ValidationResult;

const METADATA: ActionMetadata = ActionMetadata {
    id: WEARING,
    group: "wearable_manipulation",
    required_messages: &["no_target", "not_wearable", "already_wearing", "not_reachable", "worn"],
    requires_direct_object: true,
    requires_indirect_object: false,
};

/// Put on a wearable, picking it up first if needed.
#[derive(Debug, Clone, Copy)]
pub struct WearingAction;

impl Action for WearingAction {
    fn metadata(&self) -> &ActionMetadata {
        &METADATA
    }

    fn validate(&self, ctx: &ActionContext<'_>) -> ValidationResult {
        let Some(item) = ctx.direct_object().and_then(|id| ctx.world.get_entity(id)) else {
            return ValidationResult::invalid("no_target");
        };
        let name = item.name.clone();
        let Some(wearable) = &item.traits.wearable else {
            return ValidationResult::invalid("not_wearable").with_param("item", name);
        };
        if wearable.is_worn {
            return ValidationResult::invalid("already_wearing").with_param("item", name);
        }
        if !ctx.can_reach(&item.id) {
            return ValidationResult::invalid("not_reachable").with_param("item", name);
        }
        ValidationResult::ok().with_param("item", name)
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult<()> {
        let item = ctx.require_direct_object()?;
        let player = ctx.player().clone();
        if ctx.world.get_location(&item) != Some(&player) {
            ctx.world.move_entity(&item, &player)?;
        }
        ctx.world.update_entity(&item, |entity| {
            if let Some(wearable) = entity.traits.wearable.as_mut() {
                wearable.is_worn = true;
                wearable.worn_by = Some(player);
            }
        })?;
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
                WORN,
                event_data([("item", name.clone().into()), ("itemId", item.as_str().into())]),
            ),
            ctx.success("worn", event_data([("item", name.into())])),
        ]
    }

    fn blocked(&self, ctx: &ActionContext<'_>, validation: &ValidationResult) -> Option<Vec<SemanticEvent>> {
        Some(vec![ctx.blocked_event(validation)])
    }
}
