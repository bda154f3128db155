//! Action protocol and standard actions for Taleweaver.
//!
//! An action turns a [`ParsedCommand`] into semantic events. Phased actions
//! ([`Action`]) validate, execute, and report as separate steps, with an
//! optional `blocked` hook for refusals. Legacy actions ([`LegacyAction`])
//! validate optionally and return their events straight from execute.
//! [`run_action`] drives either shape and never lets an error escape: every
//! failure comes back as an `action.error` or `action.blocked` event.

/// Action traits and metadata.
pub mod action;
/// The standard action set.
pub mod actions;
/// Parsed player commands.
pub mod command;
/// Per-invocation action context and event factory.
pub mod context;
/// The action driver.
pub mod driver;
/// Error types for the execute phase.
pub mod error;
/// Registry of actions by id.
pub mod registry;
/// Validation outcomes.
pub mod validation;

/// Re-exports of the action traits and metadata.
pub use action::{Action, ActionKind, ActionMetadata, LegacyAction};
/// Re-export of [`command::ParsedCommand`].
pub use command::ParsedCommand;
/// Re-exports of the context types.
pub use context::{ActionContext, EXECUTION_FAILED, SharedData, event_data};
/// Re-export of [`driver::run_action`].
pub use driver::run_action;
/// Re-exports of [`error::ActionError`] and [`error::ActionResult`].
pub use error::{ActionError, ActionResult};
/// Re-export of [`registry::ActionRegistry`].
pub use registry::ActionRegistry;
/// Re-export of [`validation::ValidationResult`].
pub use validation::ValidationResult;
