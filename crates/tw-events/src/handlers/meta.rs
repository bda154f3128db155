use serde_json::Value;
use tw_core::SemanticEvent;
use tw_core::types::{FLAG_SET, SCORE_CHANGED};
use tw_world::{World, WorldError, WorldModel, WorldResult};

use super::HandlerRegistry;

/// World state key holding the running score.
pub const SCORE_KEY: &str = "score";

pub(crate) fn register(registry: &mut HandlerRegistry) {
    registry
        .handle(SCORE_CHANGED, handle_score_changed)
        .validate(SCORE_CHANGED, |event, _| event.get("points").is_some_and(Value::is_i64));
    registry
        .handle(FLAG_SET, handle_flag_set)
        .validate(FLAG_SET, |event, _| event.get_str("flag").is_some());
}

/// Adds `points` to the score.
fn handle_score_changed(event: &SemanticEvent, world: &mut World) -> WorldResult<()> {
    let points: i64 = event.field("points")?;
    let score = current_score(world)
        .checked_add(points)
        .ok_or_else(score_overflow)?;
    world.set_state_value(SCORE_KEY, Value::from(score));
    Ok(())
}

/// The running score, 0 before anything was scored.
pub(crate) fn current_score<W: WorldModel>(world: &W) -> i64 {
    WorldModel::state_value(world, SCORE_KEY)
        .and_then(Value::as_i64)
        .unwrap_or(0)
}

pub(crate) fn score_overflow() -> WorldError {
    WorldError::Rejected("score overflow".into())
}

/// Stores `value` (default `true`) under the flag's name.
fn handle_flag_set(event: &SemanticEvent, world: &mut World) -> WorldResult<()> {
    let flag: String = event.field("flag")?;
    let value = event.get("value").cloned().unwrap_or(Value::Bool(true));
    world.set_state_value(flag, value);
    Ok(())
}
