use tw_core::SemanticEvent;
use tw_core::types::{SWITCHED_OFF, SWITCHED_ON};
use tw_world::WorldModel;

use super::{SWITCHING_OFF, SWITCHING_ON, report_failure};
use crate::action::{Action, ActionMetadata};
use crate::context::{ActionContext, event_data};
use crate::error::{ActionError, ActionResult};
use crate::validation::ValidationResult;

const ON_METADATA: ActionMetadata = ActionMetadata {
    id: SWITCHING_ON,
    group: "device_manipulation",
    required_messages: &["no_target", "not_switchable", "already_on", "switched_on"],
    requires_direct_object: true,
    requires_indirect_object: false,
};

const OFF_METADATA: ActionMetadata = ActionMetadata {
    id: SWITCHING_OFF,
    group: "device_manipulation",
    required_messages: &["no_target", "not_switchable", "already_off", "switched_off"],
    requires_direct_object: true,
    requires_indirect_object: false,
};

/// Turn a switchable device on or off.
#[derive(Debug, Clone, Copy)]
pub struct SwitchingAction {
    on: bool,
}

impl SwitchingAction {
    /// `switch on`.
    pub const ON: Self = Self { on: true };
    /// `switch off`.
    pub const OFF: Self = Self { on: false };

    fn event_type(&self) -> &'static str {
        if self.on { SWITCHED_ON } else { SWITCHED_OFF }
    }

    fn message(&self) -> &'static str {
        if self.on { "switched_on" } else { "switched_off" }
    }
}

impl Action for SwitchingAction {
    fn metadata(&self) -> &ActionMetadata {
        if self.on { &ON_METADATA } else { &OFF_METADATA }
    }

    fn validate(&self, ctx: &ActionContext<'_>) -> ValidationResult {
        let Some(item) = ctx.direct_object().and_then(|id| ctx.world.get_entity(id)) else {
            return ValidationResult::invalid("no_target");
        };
        let name = item.name.clone();
        match &item.traits.switchable {
            None => ValidationResult::invalid("not_switchable").with_param("item", name),
            Some(device) if device.is_on == self.on => {
                let error = if self.on { "already_on" } else { "already_off" };
                ValidationResult::invalid(error).with_param("item", name)
            }
            Some(_) => ValidationResult::ok().with_param("item", name),
        }
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult<()> {
        let item = ctx.require_direct_object()?;
        let on = self.on;
        ctx.world.update_entity(&item, |entity| {
            if let Some(device) = entity.traits.switchable.as_mut() {
                device.is_on = on;
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
                self.event_type(),
                event_data([("item", name.clone().into()), ("itemId", item.as_str().into())]),
            ),
            ctx.success(self.message(), event_data([("item", name.into())])),
        ]
    }

    fn blocked(&self, ctx: &ActionContext<'_>, validation: &ValidationResult) -> Option<Vec<SemanticEvent>> {
        Some(vec![ctx.blocked_event(validation)])
    }
}
