//! The standard action set.
//!
//! Every phased action reports its own success and failure events; the
//! driver only adds an `execution_failed` error when a report leaves one out.

use tw_core::SemanticEvent;

use crate::action::ActionKind;
use crate::context::ActionContext;
use crate::error::ActionError;
use crate::validation::ValidationResult;

/// Closing openable things.
pub mod closing;
/// Dropping carried things where the player stands.
pub mod dropping;
/// Looking at one thing closely.
pub mod examining;
/// Opening openable things.
pub mod opening;
/// Switching devices on and off.
pub mod switching;
/// Picking things up.
pub mod taking;
/// Letting a turn pass.
pub mod waiting;
/// Putting on wearable things.
pub mod wearing;

/// Id of [`taking::TakingAction`].
pub const TAKING: &str = "if.action.taking";
/// Id of the dropping action.
pub const DROPPING: &str = "if.action.dropping";
/// Id of the opening action.
pub const OPENING: &str = "if.action.opening";
/// Id of the closing action.
pub const CLOSING: &str = "if.action.closing";
/// Id of the switching-on action.
pub const SWITCHING_ON: &str = "if.action.switching_on";
/// Id of the switching-off action.
pub const SWITCHING_OFF: &str = "if.action.switching_off";
/// Id of the wearing action.
pub const WEARING: &str = "if.action.wearing";
/// Id of the examining action.
pub const EXAMINING: &str = "if.action.examining";
/// Id of the waiting action.
pub const WAITING: &str = "if.action.waiting";

/// One instance of every standard action.
pub fn standard_actions() -> Vec<ActionKind> {
    vec![
        ActionKind::phased(taking::TakingAction),
        ActionKind::phased(dropping::DroppingAction),
        ActionKind::phased(opening::OpeningAction),
        ActionKind::phased(closing::ClosingAction),
        ActionKind::phased(switching::SwitchingAction::ON),
        ActionKind::phased(switching::SwitchingAction::OFF),
        ActionKind::phased(wearing::WearingAction),
        ActionKind::phased(examining::ExaminingAction),
        ActionKind::legacy(waiting::WaitingAction),
    ]
}

/// Error events for a report that follows a failed execute or validation.
/// `None` means the action succeeded and should describe its outcome.
pub(crate) fn report_failure(
    ctx: &ActionContext<'_>,
    validation: Option<&ValidationResult>,
    error: Option<&ActionError>,
) -> Option<Vec<SemanticEvent>> {
    if let Some(err) = error {
        return Some(vec![ctx.execution_failed(err)]);
    }
    validation
        .filter(|v| !v.valid)
        .map(|v| vec![ctx.validation_error(v)])
}
