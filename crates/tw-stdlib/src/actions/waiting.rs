use tw_core::SemanticEvent;
use tw_core::types::WAITED;

use super::WAITING;
use crate::action::{ActionMetadata, LegacyAction};
use crate::context::ActionContext;
use crate::error::ActionResult;

const METADATA: ActionMetadata = ActionMetadata {
    id: WAITING,
    group: "meta",
    required_messages: &["waited"],
    requires_direct_object: false,
    requires_indirect_object: false,
};

/// Let time pass. Two-phase: execute returns the events directly.
#[derive(Debug, Clone, Copy)]
pub struct WaitingAction;

impl LegacyAction for WaitingAction {
    fn metadata(&self) -> &ActionMetadata {
        &METADATA
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult<Vec<SemanticEvent>> {
        Ok(vec![
            ctx.event(WAITED, Default::default()),
            ctx.success("waited", Default::default()),
        ])
    }
}
