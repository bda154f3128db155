use tw_core::SemanticEvent;
use tw_core::types::EXAMINED;
use tw_world::WorldModel;

use super::{EXAMINING, report_failure};
use crate::action::{Action, ActionMetadata};
use crate::context::{ActionContext, event_data};
use crate::error::{ActionError, ActionResult};
use crate::validation::ValidationResult;

const METADATA: ActionMetadata = ActionMetadata {
    id: EXAMINING,
    group: "observation",
    required_messages: &["no_target", "not_visible", "examined", "nothing_special"],
    requires_direct_object: true,
    requires_indirect_object: false,
};

/// Look closely at something. Changes nothing itself; the `examined`
/// event carries the description to the text layer.
#[derive(Debug, Clone, Copy)]
pub struct ExaminingAction;

impl Action for ExaminingAction {
    fn metadata(&self) -> &ActionMetadata {
        &METADATA
    }

    fn validate(&self, ctx: &ActionContext<'_>) -> ValidationResult {
        let Some(item) = ctx.direct_object().and_then(|id| ctx.world.get_entity(id)) else {
            return ValidationResult::invalid("no_target");
        };
        let visible = item.id == *ctx.player()
            || Some(&item.id) == ctx.current_location()
            || ctx.can_reach(&item.id);
        if !visible {
            return ValidationResult::invalid("not_visible").with_param("item", item.name.clone());
        }
        ValidationResult::ok().with_param("item", item.name.clone())
    }

    fn execute(&self, _ctx: &mut ActionContext<'_>) -> ActionResult<()> {
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
        let Some(item) = ctx.direct_object().and_then(|id| ctx.world.get_entity(id)) else {
            return vec![ctx.error_event("no_target", None, Default::default())];
        };
        let message = if item.description.is_empty() {
            "nothing_special"
        } else {
            "examined"
        };
        vec![
            ctx.event(
                EXAMINED,
                event_data([
                    ("item", item.name.clone().into()),
                    ("itemId", item.id.as_str().into()),
                ]),
            ),
            ctx.success(
                message,
                event_data([
                    ("item", item.name.clone().into()),
                    ("description", item.description.clone().into()),
                ]),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionKind;
    use crate::actions::test_support::{run, types, world};
    use tw_core::types::{ACTION_ERROR, ACTION_SUCCESS};

    #[test]
    fn examining_reports_description() {
        let mut world = world();
        let events = run(ActionKind::phased(ExaminingAction), &mut world, Some("lamp"));
        assert_eq!(types(&events), [EXAMINED, ACTION_SUCCESS]);
        assert_eq!(events[1].get_str("messageId"), Some("examined"));
        assert_eq!(
            events[1].get("params").and_then(|p| p.get("description")).and_then(|d| d.as_str()),
            Some("A dented brass lamp.")
        );
    }

    #[test]
    fn undescribed_things_are_nothing_special() {
        let mut world = world();
        let events = run(ActionKind::phased(ExaminingAction), &mut world, Some("cloak"));
        assert_eq!(events[1].get_str("messageId"), Some("nothing_special"));
    }

    #[test]
    fn things_in_closed_containers_are_not_visible() {
        let mut world = world();
        let events = run(ActionKind::phased(ExaminingAction), &mut world, Some("coin"));
        assert_eq!(types(&events), [ACTION_ERROR]);
        assert_eq!(events[0].get_str("error"), Some("not_visible"));
    }
}
