use tracing::debug;
use tw_core::types::ACTION_ERROR;
use tw_core::{EntityId, SemanticEvent};
use tw_world::World;

use crate::action::{Action, ActionKind, LegacyAction};
use crate::command::ParsedCommand;
use crate::context::ActionContext;

/// Run one action for one command and return the events it produced.
///
/// A fresh [`ActionContext`] is built for the call and dropped afterwards.
/// Phased actions never reach `execute` when validation fails; an execute
/// error is always reported as an `action.error` of kind `execution_failed`.
pub fn run_action(
    action: &ActionKind,
    world: &mut World,
    command: &ParsedCommand,
    player: &EntityId,
) -> Vec<SemanticEvent> {
    let mut ctx = ActionContext::new(world, command, player.clone(), action.id());
    let events = match action {
        ActionKind::Phased(action) => run_phased(action.as_ref(), &mut ctx),
        ActionKind::Legacy(action) => run_legacy(action.as_ref(), &mut ctx),
    };
    debug!(
        action = action.id(),
        events = events.len(),
        failed = events.iter().any(|e| e.is(ACTION_ERROR)),
        "action finished"
    );
    events
}

fn run_phased(action: &dyn Action, ctx: &mut ActionContext<'_>) -> Vec<SemanticEvent> {
    let validation = action.validate(ctx);
    if !validation.valid {
        if let Some(events) = action.blocked(ctx, &validation) {
            return events;
        }
        let events = action.report(ctx, Some(&validation), None);
        if events.is_empty() {
            return vec![ctx.validation_error(&validation)];
        }
        return events;
    }

    match action.execute(ctx) {
        Ok(()) => action.report(ctx, Some(&validation), None),
        Err(err) => {
            let mut events = action.report(ctx, Some(&validation), Some(&err));
            if !events.iter().any(|e| e.is(ACTION_ERROR)) {
                events.push(ctx.execution_failed(&err));
            }
            events
        }
    }
}

fn run_legacy(action: &dyn LegacyAction, ctx: &mut ActionContext<'_>) -> Vec<SemanticEvent> {
    if let Some(validation) = action.validate(ctx).filter(|v| !v.valid) {
        return vec![ctx.validation_error(&validation)];
    }
    match action.execute(ctx) {
        Ok(events) => events,
        Err(err) => vec![ctx.execution_failed(&err)],
    }
}
