use serde_json::Value;
use tw_core::types::TAKEN;
use tw_core::{EntityId, SemanticEvent};
use tw_world::WorldModel;

use super::{TAKING, report_failure};
use crate::action::{Action, ActionMetadata};
use crate::context::{ActionContext, event_data};
use crate::error::{ActionError, ActionResult};
use crate::validation::ValidationResult;

const METADATA: ActionMetadata = ActionMetadata {
    id: TAKING,
    group: "object_manipulation",
    required_messages: &[
        "no_target",
        "cant_take_self",
        "already_have",
        "cant_take_room",
        "fixed_in_place",
        "container_full",
        "cannot_take",
        "taken",
        "taken_from",
    ],
    requires_direct_object: true,
    requires_indirect_object: false,
};

const PREVIOUS_LOCATION: &str = "previousLocation";

/// Pick something up.
#[derive(Debug, Clone, Copy)]
pub struct TakingAction;

impl Action for TakingAction {
    fn metadata(&self) -> &ActionMetadata {
        &METADATA
    }

    fn validate(&self, ctx: &ActionContext<'_>) -> ValidationResult {
        let Some(item) = ctx.direct_object().and_then(|id| ctx.world.get_entity(id)) else {
            return ValidationResult::invalid("no_target");
        };
        let name = item.name.clone();

        if item.id == *ctx.player() {
            return ValidationResult::invalid("cant_take_self");
        }
        if ctx.world.get_location(&item.id) == Some(ctx.player()) {
            return ValidationResult::invalid("already_have").with_param("item", name);
        }
        if item.is_room() {
            return ValidationResult::invalid("cant_take_room").with_param("item", name);
        }
        if let Some(scenery) = &item.traits.scenery {
            let result = ValidationResult::invalid("fixed_in_place").with_param("item", name);
            return match &scenery.cant_take_message {
                Some(message) => result.with_message_id(message.clone()),
                None => result,
            };
        }
        if !ctx.can_reach(&item.id) {
            return ValidationResult::invalid("cannot_take").with_param("item", name);
        }
        if inventory_full(ctx) {
            return ValidationResult::invalid("container_full").with_param("item", name);
        }
        ValidationResult::ok().with_param("item", name)
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult<()> {
        let item = ctx.require_direct_object()?;
        if let Some(previous) = ctx.world.get_location(&item) {
            let previous = previous.to_string();
            ctx.shared.insert(PREVIOUS_LOCATION, previous);
        }
        let player = ctx.player().clone();
        ctx.world.move_entity(&item, &player)?;
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
        let previous: Option<EntityId> = ctx.shared.get_as(PREVIOUS_LOCATION);
        let item_name = ctx.name_of(item);

        let taken = ctx.event(
            TAKEN,
            event_data([
                ("item", item_name.clone().into()),
                ("itemId", item.as_str().into()),
                ("actor", ctx.name_of(ctx.player()).into()),
                ("actorId", ctx.player().as_str().into()),
                ("previousLocation", previous.as_ref().map(|p| p.as_str()).into()),
            ]),
        );

        // Taking out of a container or off a supporter reads differently.
        let from_holder = previous
            .as_ref()
            .filter(|p| Some(*p) != ctx.current_location());
        let success = match from_holder {
            Some(holder) => ctx.success(
                "taken_from",
                event_data([
                    ("item", item_name.into()),
                    ("container", ctx.name_of(holder).into()),
                ]),
            ),
            None => ctx.success("taken", event_data([("item", Value::from(item_name))])),
        };
        vec![taken, success]
    }

    fn blocked(&self, ctx: &ActionContext<'_>, validation: &ValidationResult) -> Option<Vec<SemanticEvent>> {
        Some(vec![ctx.blocked_event(validation)])
    }
}

/// The player's own container capacity, if it has one, is used up.
fn inventory_full(ctx: &ActionContext<'_>) -> bool {
    let Some(capacity) = ctx
        .world
        .get_entity(ctx.player())
        .and_then(|p| p.traits.container.as_ref())
        .and_then(|c| c.capacity)
    else {
        return false;
    };
    ctx.world.contents(ctx.player()).len() >= capacity
}
