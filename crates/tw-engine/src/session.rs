//! Game session: one command in, one processed turn out.

use std::fmt;

use serde::Serialize;
use tracing::debug;
use tw_core::SemanticEvent;
use tw_core::types::{ACTION_BLOCKED, ACTION_ERROR};
use tw_events::{EventProcessor, ProcessedEvents, ProcessorOptions};
use tw_stdlib::{ActionRegistry, ParsedCommand, run_action};
use tw_world::World;

use crate::error::{EngineError, EngineResult};

/// What one command did.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResult {
    /// 1-based turn number.
    pub turn: u64,
    /// The action that ran.
    pub action_id: &'static str,
    /// Events the action produced, before processing.
    pub events: Vec<SemanticEvent>,
    /// What the processor made of them.
    pub processed: ProcessedEvents,
    /// `false` if the action reported an error or was blocked.
    pub success: bool,
}

/// An interactive fiction session.
///
/// Owns the world (through the processor) and the action set. Every
/// [`execute`](Self::execute) runs the command's action against the world,
/// then feeds the resulting events to the processor.
pub struct GameSession {
    processor: EventProcessor<World>,
    actions: ActionRegistry,
    turn: u64,
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("turn", &self.turn)
            .field("actions", &self.actions.len())
            .field("options", self.processor.options())
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// A session with the standard handlers and standard actions.
    ///
    /// Fails with [`EngineError::NoPlayer`] if the world has no player.
    pub fn new(world: World, options: ProcessorOptions) -> EngineResult<Self> {
        Self::with_processor(EventProcessor::new(world, options), ActionRegistry::standard())
    }

    /// A session over a prepared processor and action set.
    pub fn with_processor(processor: EventProcessor<World>, actions: ActionRegistry) -> EngineResult<Self> {
        if processor.world().player_id().is_none() {
            return Err(EngineError::NoPlayer);
        }
        Ok(Self {
            processor,
            actions,
            turn: 0,
        })
    }

    /// Get the current world.
    pub fn world(&self) -> &World {
        self.processor.world()
    }

    /// Get a mutable reference to the world.
    pub fn world_mut(&mut self) -> &mut World {
        self.processor.world_mut()
    }

    /// The processor, for registering story handlers or changing options.
    pub fn processor_mut(&mut self) -> &mut EventProcessor<World> {
        &mut self.processor
    }

    /// The actions commands are dispatched to.
    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    /// Mutable access to the action set, for adding story actions.
    pub fn actions_mut(&mut self) -> &mut ActionRegistry {
        &mut self.actions
    }

    /// Turns completed so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Run one command.
    ///
    /// Errors only when the command cannot start: an unknown action id or a
    /// world that lost its player. A blocked or failed action still counts
    /// as a turn.
    pub fn execute(&mut self, command: &ParsedCommand) -> EngineResult<TurnResult> {
        let action = self
            .actions
            .get(&command.action)
            .ok_or_else(|| EngineError::UnknownAction(command.action.clone()))?;
        let player = self
            .processor
            .world()
            .player_id()
            .cloned()
            .ok_or(EngineError::NoPlayer)?;

        let events = run_action(action, self.processor.world_mut(), command, &player);
        let success = !events
            .iter()
            .any(|e| e.is(ACTION_ERROR) || e.is(ACTION_BLOCKED));
        let processed = self.processor.process_events(events.clone());

        self.turn += 1;
        debug!(
            turn = self.turn,
            action = action.id(),
            success,
            applied = processed.applied.len(),
            failed = processed.failed.len(),
            rejected_effects = processed.rejected_effects.len(),
            "turn complete"
        );

        Ok(TurnResult {
            turn: self.turn,
            action_id: action.id(),
            events,
            processed,
            success,
        })
    }
}
