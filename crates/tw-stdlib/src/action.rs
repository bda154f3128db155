use std::fmt;

use serde::Serialize;
use tw_core::SemanticEvent;

use crate::context::ActionContext;
use crate::error::{ActionError, ActionResult};
use crate::validation::ValidationResult;

/// Static description of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionMetadata {
    /// Namespaced id, e.g. `"if.action.taking"`.
    pub id: &'static str,
    /// Grouping for help and menus, e.g. `"object_manipulation"`.
    pub group: &'static str,
    /// Message ids the text layer must provide.
    pub required_messages: &'static [&'static str],
    /// Refuse the command when it names no direct object.
    pub requires_direct_object: bool,
    /// Refuse the command when it names no indirect object.
    pub requires_indirect_object: bool,
}

/// An action following validate, execute, report, and optionally blocked.
///
/// `execute` only mutates the world. Every event comes from `report` (or
/// `blocked`), which also sees any execute error.
pub trait Action: Send + Sync {
    /// Static description of the action.
    fn metadata(&self) -> &ActionMetadata;

    /// Decide whether the command can run. Must not mutate.
    fn validate(&self, ctx: &ActionContext<'_>) -> ValidationResult;

    /// Perform the mutation. Only called after a passing validation.
    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult<()>;

    /// Describe what happened. Receives the validation result, and the
    /// execute error if there was one.
    fn report(
        &self,
        ctx: &ActionContext<'_>,
        validation: Option<&ValidationResult>,
        error: Option<&ActionError>,
    ) -> Vec<SemanticEvent>;

    /// Events for a failed validation. `None` leaves it to `report`.
    fn blocked(&self, _ctx: &ActionContext<'_>, _validation: &ValidationResult) -> Option<Vec<SemanticEvent>> {
        None
    }
}

/// An action whose execute both mutates and returns its events.
pub trait LegacyAction: Send + Sync {
    /// Static description of the action.
    fn metadata(&self) -> &ActionMetadata;

    /// Optional pre-check. `None` means the action does not validate.
    fn validate(&self, _ctx: &ActionContext<'_>) -> Option<ValidationResult> {
        None
    }

    /// Mutate and describe. An error becomes a single `action.error` event.
    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult<Vec<SemanticEvent>>;
}

/// Either shape of action. The driver picks its path from the variant.
pub enum ActionKind {
    /// Runs validate, execute, then report.
    Phased(Box<dyn Action>),
    /// Runs an optional validate, then an execute that returns events.
    Legacy(Box<dyn LegacyAction>),
}

impl ActionKind {
    /// Box a phased action.
    pub fn phased(action: impl Action + 'static) -> Self {
        Self::Phased(Box::new(action))
    }

    /// Box a legacy action.
    pub fn legacy(action: impl LegacyAction + 'static) -> Self {
        Self::Legacy(Box::new(action))
    }

    /// The wrapped action's metadata.
    pub fn metadata(&self) -> &ActionMetadata {
        match self {
            Self::Phased(action) => action.metadata(),
            Self::Legacy(action) => action.metadata(),
        }
    }

    /// The wrapped action's id.
    pub fn id(&self) -> &'static str {
        self.metadata().id
    }
}

impl fmt::Debug for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = match self {
            Self::Phased(_) => "Phased",
            Self::Legacy(_) => "Legacy",
        };
        f.debug_tuple(shape).field(&self.id()).finish()
    }
}
