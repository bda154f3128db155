//! Event type discriminators.
//!
//! The processor never interprets these; they are shared so that actions,
//! standard handlers, and story content agree on spelling.

// Action outcomes
/// An action completed and wants a success message rendered.
pub const ACTION_SUCCESS: &str = "action.success";
/// An action failed, either in validation or during execution.
pub const ACTION_ERROR: &str = "action.error";
/// An action was rejected by its own validation.
pub const ACTION_BLOCKED: &str = "action.blocked";

// Movement
/// An actor picked something up.
pub const TAKEN: &str = "if.event.taken";
/// An actor put something down in its location.
pub const DROPPED: &str = "if.event.dropped";
/// Something was placed inside a container.
pub const PUT_IN: &str = "if.event.put_in";
/// Something was placed on a supporter.
pub const PUT_ON: &str = "if.event.put_on";
/// Something was taken out of a container or off a supporter.
pub const REMOVED: &str = "if.event.removed";
/// An actor went from one room to another.
pub const ACTOR_MOVED: &str = "if.event.actor_moved";

// State change
/// Something openable was opened.
pub const OPENED: &str = "if.event.opened";
/// Something openable was closed.
pub const CLOSED: &str = "if.event.closed";
/// Something lockable was locked.
pub const LOCKED: &str = "if.event.locked";
/// Something lockable was unlocked.
pub const UNLOCKED: &str = "if.event.unlocked";
/// A wearable was put on.
pub const WORN: &str = "if.event.worn";
/// A wearable was taken off.
pub const TAKEN_OFF: &str = "if.event.taken_off";
/// A named property of an entity changed (`property`, `newValue`).
pub const STATE_CHANGED: &str = "if.event.state_changed";

// Observation
/// An entity was examined.
pub const EXAMINED: &str = "if.event.examined";
/// A container or location was searched.
pub const SEARCHED: &str = "if.event.searched";
/// The actor looked around its location.
pub const LOOKED: &str = "if.event.looked";

// Device
/// A switchable device was turned on.
pub const SWITCHED_ON: &str = "if.event.switched_on";
/// A switchable device was turned off.
pub const SWITCHED_OFF: &str = "if.event.switched_off";

// Complex manipulation
/// Something was pushed.
pub const PUSHED: &str = "if.event.pushed";
/// Something was pulled.
pub const PULLED: &str = "if.event.pulled";
/// Something was turned.
pub const TURNED: &str = "if.event.turned";
/// Something edible was eaten.
pub const EATEN: &str = "if.event.eaten";
/// Something was destroyed and leaves the world.
pub const DESTROYED: &str = "if.event.destroyed";

// Meta
/// Time passed without anything happening.
pub const WAITED: &str = "if.event.waited";
/// The score changed (`points`).
pub const SCORE_CHANGED: &str = "if.event.score_changed";
/// A story flag was set (`flag`, `value`).
pub const FLAG_SET: &str = "if.event.flag_set";
/// A message for the text layer that changes nothing.
pub const GAME_MESSAGE: &str = "game.message";
