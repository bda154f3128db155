use tw_core::SemanticEvent;
use tw_core::types::CLOSED;
use tw_world::WorldModel;

use super::{CLOSING, report_failure};
use crate::action::{Action, ActionMetadata};
use crate::context::{ActionContext, event_data};
use crate::error::{ActionError, ActionResult};
use crate::validation::ValidationResult;

const METADATA: ActionMetadata = ActionMetadata {
    id: CLOSING,
    group: "container_manipulation",
    required_messages: &["no_target", "not_closable", "already_closed", "closed"],
    requires_direct_object: true,
    requires_indirect_object: false,
};

/// Close something openable. Has no `blocked` phase; refusals come from `report`.
#[derive(Debug, Clone, Copy)]
pub struct ClosingAction;

impl Action for ClosingAction {
    fn metadata(&self) -> &ActionMetadata {
        &METADATA
    }

    fn validate(&self, ctx: &ActionContext<'_>) -> ValidationResult {
        let Some(item) = ctx.direct_object().and_then(|id| ctx.world.get_entity(id)) else {
            return ValidationResult::invalid("no_target");
        };
        let name = item.name.clone();
        match &item.traits.openable {
            None => ValidationResult::invalid("not_closable").with_param("item", name),
            Some(openable) if !openable.is_open => {
                ValidationResult::invalid("already_closed").with_param("item", name)
            }
            Some(_) => ValidationResult::ok().with_param("item", name),
        }
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult<()> {
        let item = ctx.require_direct_object()?;
        ctx.world.update_entity(&item, |entity| {
            if let Some(openable) = entity.traits.openable.as_mut() {
                openable.is_open = false;
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
                CLOSED,
                event_data([("item", name.clone().into()), ("itemId", item.as_str().into())]),
            ),
            ctx.success("closed", event_data([("item", name.into())])),
        ]
    }
}
