use serde_json::Value;
use tw_core::SemanticEvent;
use tw_core::types::OPENED;
use tw_world::WorldModel;

use super::{OPENING, report_failure};
use crate::action::{Action, ActionMetadata};
use crate::context::{ActionContext, event_data};
use crate::error::{ActionError, ActionResult};
use crate::validation::ValidationResult;

const METADATA: ActionMetadata = ActionMetadata {
    id: OPENING,
    group: "container_manipulation",
    required_messages: &["no_target", "not_openable", "already_open", "locked", "opened", "revealing"],
    requires_direct_object: true,
    requires_indirect_object: false,
};

/// Open a door, box, or anything else with the openable trait.
#[derive(Debug, Clone, Copy)]
pub struct OpeningAction;

impl Action for OpeningAction {
    fn metadata(&self) -> &ActionMetadata {
        &METADATA
    }

    fn validate(&self, ctx: &ActionContext<'_>) -> ValidationResult {
        let Some(item) = ctx.direct_object().and_then(|id| ctx.world.get_entity(id)) else {
            return ValidationResult::invalid("no_target");
        };
        let name = item.name.clone();
        let Some(openable) = &item.traits.openable else {
            return ValidationResult::invalid("not_openable").with_param("item", name);
        };
        if openable.is_open {
            return ValidationResult::invalid("already_open").with_param("item", name);
        }
        if item.traits.lockable.as_ref().is_some_and(|l| l.is_locked) {
            return ValidationResult::invalid("locked").with_param("item", name);
        }
        ValidationResult::ok().with_param("item", name)
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult<()> {
        let item = ctx.require_direct_object()?;
        ctx.world.update_entity(&item, |entity| {
            if let Some(openable) = entity.traits.openable.as_mut() {
                openable.is_open = true;
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
        let revealed: Vec<Value> = ctx
            .world
            .contents(item)
            .iter()
            .map(|id| ctx.name_of(id).into())
            .collect();

        let opened = ctx.event(
            OPENED,
            event_data([
                ("item", name.clone().into()),
                ("itemId", item.as_str().into()),
                ("revealed", Value::Array(revealed.clone())),
            ]),
        );
        let success = if revealed.is_empty() {
            ctx.success("opened", event_data([("item", name.into())]))
        } else {
            ctx.success(
                "revealing",
                event_data([("item", name.into()), ("revealed", Value::Array(revealed))]),
            )
        };
        vec![opened, success]
    }

    fn blocked(&self, ctx: &ActionContext<'_>, validation: &ValidationResult) -> Option<Vec<SemanticEvent>> {
        Some(vec![ctx.blocked_event(validation)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionKind;
    use crate::actions::test_support::{run, types, world};
    use tw_core::EntityId;
    use tw_core::types::{ACTION_BLOCKED, ACTION_SUCCESS};

    fn open(world: &mut tw_world::World, object: &str) -> Vec<SemanticEvent> {
        run(ActionKind::phased(OpeningAction), world, Some(object))
    }

    #[test]
    fn opening_reveals_contents() {
        let mut world = world();
        world
            .update_entity(&EntityId::from("chest"), |chest| {
                if let Some(lock) = chest.traits.lockable.as_mut() {
                    lock.is_locked = false;
                }
            })
            .unwrap();
        let events = open(&mut world, "chest");

        assert_eq!(types(&events), [OPENED, ACTION_SUCCESS]);
        assert_eq!(events[1].get_str("messageId"), Some("revealing"));
        assert_eq!(events[0].get("revealed"), Some(&serde_json::json!(["gold coin"])));
        let chest = world.get_entity(&EntityId::from("chest")).unwrap();
        assert!(chest.is_accessible());
    }

    #[test]
    fn locked_and_open_things_are_refused() {
        let mut world = world();
        assert_eq!(open(&mut world, "chest")[0].get_str("error"), Some("locked"));
        assert_eq!(open(&mut world, "jar")[0].get_str("error"), Some("already_open"));
        let events = open(&mut world, "lamp");
        assert_eq!(types(&events), [ACTION_BLOCKED]);
        assert_eq!(events[0].get_str("error"), Some("not_openable"));
    }
}
