use tw_core::CoreError;
use tw_world::WorldError;

/// Alias for `Result<T, ActionError>`.
pub type ActionResult<T> = Result<T, ActionError>;

/// A failure during an action's execute phase.
///
/// The driver never lets one escape: it is reported back through the
/// action and ends up as an `action.error` event of kind `execution_failed`.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// The command was missing an object the action needs.
    #[error("{action} needs a {slot} object")]
    MissingObject {
        /// The action id.
        action: &'static str,
        /// "direct" or "indirect".
        slot: &'static str,
    },

    /// The world refused a mutation.
    #[error(transparent)]
    World(#[from] WorldError),

    /// Event data could not be built or read.
    #[error(transparent)]
    Event(#[from] CoreError),

    /// Free-form failure.
    #[error("{0}")]
    Failed(String),
}
