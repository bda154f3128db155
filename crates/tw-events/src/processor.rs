use std::fmt;

use tracing::{debug, error, trace, warn};
use tw_core::SemanticEvent;
use tw_world::{HandlerResult, Reaction, World, WorldModel};

use crate::config::ProcessorOptions;
use crate::effects::EffectProcessor;
use crate::entity_handlers::{invoke_entity_handlers, run_isolated};
use crate::handlers::HandlerRegistry;
use crate::result::{FailedEvent, ProcessedEvents};
use crate::story::{HandlerId, StoryHandlers, story_handler};

const VALIDATION_FAILED: &str = "Event validation failed";
const UNKNOWN_ERROR: &str = "Unknown error";

/// Applies batches of semantic events to a world and resolves their reactions.
///
/// Owns the world for its lifetime. Each top-level event runs through the
/// validation gate, the optional preview, and the world's standard handler;
/// the target's entity handlers and any story handlers may then produce
/// reactions, which are processed level by level up to
/// [`ProcessorOptions::max_reaction_depth`].
pub struct EventProcessor<W: WorldModel = World> {
    world: W,
    options: ProcessorOptions,
    story: StoryHandlers<W>,
}

impl<W: WorldModel + fmt::Debug> fmt::Debug for EventProcessor<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventProcessor")
            .field("world", &self.world)
            .field("options", &self.options)
            .field("story", &self.story)
            .finish()
    }
}

impl EventProcessor<World> {
    /// Create a processor over `world` with the standard handlers installed.
    pub fn new(world: World, options: ProcessorOptions) -> Self {
        Self::with_registry(world, &HandlerRegistry::standard(), options)
    }

    /// Create a processor over `world`, installing the handlers, validators,
    /// and previewers from `registry` first.
    pub fn with_registry(mut world: World, registry: &HandlerRegistry, options: ProcessorOptions) -> Self {
        registry.install(&mut world);
        Self::bare(world, options)
    }
}

impl<W: WorldModel> EventProcessor<W> {
    /// Create a processor that uses whatever handlers `world` already has.
    pub fn bare(world: W, options: ProcessorOptions) -> Self {
        Self {
            world,
            options,
            story: StoryHandlers::default(),
        }
    }

    /// Replace the processing options.
    pub fn set_options(&mut self, options: ProcessorOptions) {
        self.options = options;
    }

    /// Current options.
    pub fn options(&self) -> &ProcessorOptions {
        &self.options
    }

    /// The world being processed.
    pub fn world(&self) -> &W {
        &self.world
    }

    /// Mutable access to the world, e.g. to set up a scene between batches.
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    /// Extract the world, consuming the processor.
    pub fn into_world(self) -> W {
        self.world
    }

    // -----------------------------------------------------------------------
    // Story handlers
    // -----------------------------------------------------------------------

    /// Register a story-level handler for an event type. Handlers for the
    /// same type run in registration order, after the target's entity handlers.
    pub fn register_handler<F>(&mut self, event_type: impl Into<String>, handler: F) -> HandlerId
    where
        F: Fn(&SemanticEvent, &mut W) -> HandlerResult<Vec<Reaction>> + Send + Sync + 'static,
    {
        self.story.register(event_type, story_handler(handler))
    }

    /// Remove a story-level handler. Returns `false` if it was not registered.
    pub fn unregister_handler(&mut self, event_type: &str, id: HandlerId) -> bool {
        self.story.unregister(event_type, id)
    }

    /// The registered story-level handlers.
    pub fn story_handlers(&self) -> &StoryHandlers<W> {
        &self.story
    }

    // -----------------------------------------------------------------------
    // Processing
    // -----------------------------------------------------------------------

    /// Process a batch in order. Each event's full cascade completes before
    /// the next event starts. Never fails as a whole.
    pub fn process_events(&mut self, events: Vec<SemanticEvent>) -> ProcessedEvents {
        let mut result = ProcessedEvents::default();
        for event in events {
            if let Some(reactions) = self.process_single(event, &mut result) {
                self.process_reactions(reactions, &mut result);
            }
        }
        result
    }

    /// Process one event and its cascade.
    pub fn process_event(&mut self, event: SemanticEvent) -> ProcessedEvents {
        self.process_events(vec![event])
    }

    /// Work through reactions one level at a time. Everything at depth `d`
    /// is attempted before anything at `d + 1`.
    fn process_reactions(&mut self, first: Vec<SemanticEvent>, result: &mut ProcessedEvents) {
        result.reactions.extend(first.iter().cloned());

        let mut level = first;
        let mut depth = 0;
        while !level.is_empty() {
            if depth >= self.options.max_reaction_depth {
                warn!(
                    depth,
                    dropped = level.len(),
                    "maximum reaction depth reached, dropping remaining reactions"
                );
                return;
            }

            let mut next = Vec::new();
            for reaction in level {
                if let Some(produced) = self.process_single(reaction, result) {
                    result.reactions.extend(produced.iter().cloned());
                    next.extend(produced);
                }
            }
            level = next;
            depth += 1;
        }
    }

    /// The single-event pipeline. Records the event as applied or failed and
    /// returns its reactions when it was applied.
    fn process_single(
        &mut self,
        event: SemanticEvent,
        result: &mut ProcessedEvents,
    ) -> Option<Vec<SemanticEvent>> {
        if self.options.validate && !self.world.can_apply_event(&event) {
            fail(result, event, VALIDATION_FAILED.to_string());
            return None;
        }

        let changes = if self.options.preview {
            self.world.preview_event(&event)
        } else {
            Vec::new()
        };

        if let Err(err) = self.world.apply_event(&event) {
            let message = err.to_string();
            let reason = if message.is_empty() {
                UNKNOWN_ERROR.to_string()
            } else {
                message
            };
            fail(result, event, reason);
            return None;
        }

        trace!(event_type = event.event_type(), id = %event.id(), "event applied");
        let mut reactions = invoke_entity_handlers(&event, &mut self.world);
        let story = self.story.for_type(event.event_type());
        reactions.extend(run_isolated(&story, &event, &mut self.world, "story"));
        let reactions = self.resolve_effects(&event, reactions, result);

        result.changes.extend(changes);
        result.applied.push(event);
        Some(reactions)
    }

    /// Apply the effects among an event's reactions as one batch. Returns the
    /// reaction events in handler order followed by whatever the batch emitted.
    fn resolve_effects(
        &mut self,
        event: &SemanticEvent,
        reactions: Vec<Reaction>,
        result: &mut ProcessedEvents,
    ) -> Vec<SemanticEvent> {
        let mut events = Vec::new();
        let mut effects = Vec::new();
        for reaction in reactions {
            match reaction {
                Reaction::Event(reaction) => events.push(reaction),
                Reaction::Effect(effect) => effects.push(effect),
            }
        }
        if effects.is_empty() {
            return events;
        }

        match EffectProcessor::new(&mut self.world).process(effects) {
            Ok(emitted) => events.extend(emitted),
            Err(rejected) => {
                error!(
                    event_type = event.event_type(),
                    rejected = rejected.len(),
                    reason = rejected.first().map(|e| e.reason.as_str()),
                    "effects rejected"
                );
                result.rejected_effects.extend(rejected);
            }
        }
        events
    }
}

fn fail(result: &mut ProcessedEvents, event: SemanticEvent, reason: String) {
    debug!(event_type = event.event_type(), %reason, "event failed");
    result.failed.push(FailedEvent { event, reason });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tw_core::EntityId;
    use tw_core::types::{CLOSED, OPENED, STATE_CHANGED, TAKEN};
    use tw_world::{Effect, Entity, HandlerError, WorldError, event_validator, standard_handler};

    // -- helpers ------------------------------------------------------------

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        (out, buffer.contents())
    }

    fn id(s: &str) -> EntityId {
        EntityId::from(s)
    }

    /// A world where `chain.N` reacts with `chain.N+1`, up to `chain.{last}`.
    fn chain_processor(len: usize, max_depth: usize) -> EventProcessor {
        let mut processor = EventProcessor::bare(
            World::default(),
            ProcessorOptions::default().with_max_reaction_depth(max_depth),
        );
        for n in 0..len - 1 {
            processor.register_handler(format!("chain.{n}"), move |_, _| {
                Ok(vec![SemanticEvent::new(format!("chain.{}", n + 1)).into()])
            });
        }
        processor
    }

    fn types(events: &[SemanticEvent]) -> Vec<String> {
        events.iter().map(|e| e.event_type().to_string()).collect()
    }

    /// Rejects events whose `valid` field is false.
    fn flagged_world() -> World {
        let mut world = World::default();
        world.register_event_validator(
            "test.event",
            event_validator(|event: &SemanticEvent, _: &World| {
                event.get("valid").and_then(|v| v.as_bool()).unwrap_or(true)
            }),
        );
        world
    }

    fn flagged(valid: bool) -> SemanticEvent {
        SemanticEvent::new("test.event").with_field("valid", valid)
    }

    // -- isolation ----------------------------------------------------------

    #[test]
    fn failure_does_not_abort_siblings() {
        let mut world = World::default();
        world.register_event_handler(
            "test.boom",
            standard_handler(|_: &SemanticEvent, _: &mut World| {
                Err(WorldError::Rejected("boom".into()))
            }),
        );
        let mut processor = EventProcessor::bare(world, ProcessorOptions::default());

        let result = processor.process_events(vec![
            SemanticEvent::new("test.ok"),
            SemanticEvent::new("test.boom"),
            SemanticEvent::new("test.ok"),
        ]);

        assert_eq!(types(&result.applied), ["test.ok", "test.ok"]);
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.failed[0].reason, "boom");
        assert!(result.failed[0].event.is("test.boom"));
    }

    #[test]
    fn empty_error_message_falls_back() {
        let mut world = World::default();
        world.register_event_handler(
            "test.silent",
            standard_handler(|_: &SemanticEvent, _: &mut World| Err(WorldError::Rejected(String::new()))),
        );
        let mut processor = EventProcessor::bare(world, ProcessorOptions::default());
        let result = processor.process_event(SemanticEvent::new("test.silent"));
        assert_eq!(result.failed[0].reason, "Unknown error");
    }

    #[test]
    fn failed_application_runs_no_entity_handler() {
        let mut world = World::default();
        let calls = Arc::new(Mutex::new(0));
        let seen = calls.clone();
        world
            .add_entity(Entity::new("vase", "vase").on("test.boom", move |_, _| {
                *seen.lock().unwrap() += 1;
                Ok(vec![SemanticEvent::new("test.reaction").into()])
            }))
            .unwrap();
        world.register_event_handler(
            "test.boom",
            standard_handler(|_: &SemanticEvent, _: &mut World| Err(WorldError::Rejected("no".into()))),
        );
        let mut processor = EventProcessor::bare(world, ProcessorOptions::default());
        let result = processor.process_event(SemanticEvent::new("test.boom").with_target("vase"));

        assert_eq!(*calls.lock().unwrap(), 0);
        assert!(result.reactions.is_empty());
        assert!(result.applied.is_empty());
    }

    // -- depth bound --------------------------------------------------------

    #[test]
    fn depth_bound_truncates_chain_with_warning() {
        let mut processor = chain_processor(5, 2);
        let (result, logs) = capture_logs(|| processor.process_event(SemanticEvent::new("chain.0")));

        assert_eq!(types(&result.applied), ["chain.0", "chain.1", "chain.2"]);
        assert!(result.failed.is_empty());
        assert!(logs.contains("maximum reaction depth reached"), "logs: {logs}");
        assert!(!result.applied_type("chain.3"));
        assert!(!result.applied_type("chain.4"));
    }

    #[test]
    fn depth_zero_applies_only_top_level() {
        let mut processor = chain_processor(3, 0);
        let result = processor.process_event(SemanticEvent::new("chain.0"));
        assert_eq!(types(&result.applied), ["chain.0"]);
        assert_eq!(types(&result.reactions), ["chain.1"]);
    }

    #[test]
    fn chain_shorter_than_bound_runs_to_completion() {
        let mut processor = chain_processor(4, 10);
        let (result, logs) = capture_logs(|| processor.process_event(SemanticEvent::new("chain.0")));
        assert_eq!(result.applied.len(), 4);
        assert!(!logs.contains("maximum reaction depth"));
    }

    #[test]
    fn set_options_changes_the_bound() {
        let mut processor = chain_processor(5, 10);
        processor.set_options(ProcessorOptions::default().with_max_reaction_depth(1));
        let result = processor.process_event(SemanticEvent::new("chain.0"));
        assert_eq!(result.applied.len(), 2);
        assert_eq!(processor.options().max_reaction_depth, 1);
    }

    // -- validation gate ----------------------------------------------------

    #[test]
    fn invalid_event_fails_validation() {
        let mut processor = EventProcessor::bare(flagged_world(), ProcessorOptions::default());
        let result = processor.process_events(vec![flagged(true), flagged(false)]);

        assert_eq!(result.applied.len(), 1);
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.failed[0].reason, "Event validation failed");
        assert_eq!(result.failed[0].event.get("valid"), Some(&serde_json::Value::Bool(false)));
    }

    #[test]
    fn validation_off_bypasses_validator() {
        let mut processor = EventProcessor::bare(
            flagged_world(),
            ProcessorOptions::default().with_validation(false),
        );
        let result = processor.process_events(vec![flagged(true), flagged(false)]);
        assert_eq!(result.applied.len(), 2);
        assert!(result.failed.is_empty());
    }

    #[test]
    fn failed_reaction_is_recorded_as_reaction_and_failure() {
        let mut processor = EventProcessor::bare(flagged_world(), ProcessorOptions::default());
        processor.register_handler("test.trigger", |_, _| Ok(vec![flagged(false).into()]));
        let result = processor.process_event(SemanticEvent::new("test.trigger"));

        assert_eq!(types(&result.applied), ["test.trigger"]);
        assert_eq!(result.reactions.len(), 1);
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.failed[0].event.id(), result.reactions[0].id());
    }

    // -- preview ------------------------------------------------------------

    #[test]
    fn preview_collects_changes_only_when_enabled() {
        let mut processor = EventProcessor::new(World::default(), ProcessorOptions::default());
        processor
            .world_mut()
            .add_entity(Entity::new("box", "box").openable(false))
            .unwrap();

        let event = SemanticEvent::new(OPENED).with_target("box");
        let result = processor.process_event(event);
        assert!(result.changes.is_empty());

        processor.set_options(ProcessorOptions::default().with_preview(true));
        let result = processor.process_event(SemanticEvent::new(CLOSED).with_target("box"));
        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.changes[0].entity_id, id("box"));
    }

    // -- entity handlers ----------------------------------------------------

    #[test]
    fn entity_handler_error_keeps_event_applied() {
        let mut world = World::default();
        world
            .add_entity(Entity::new("idol", "idol").on(TAKEN, |_, _| Err(HandlerError::msg("cursed"))))
            .unwrap();
        let mut processor = EventProcessor::bare(world, ProcessorOptions::default());

        let (result, logs) = capture_logs(|| processor.process_event(SemanticEvent::new(TAKEN).with_target("idol")));

        assert_eq!(result.applied.len(), 1);
        assert!(result.failed.is_empty());
        assert!(result.reactions.is_empty());
        assert!(logs.contains("event handler failed"));
        assert!(logs.contains("cursed"));
    }

    #[test]
    fn only_targeted_events_reach_entity_handlers() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let seen = calls.clone();
        let mut world = World::default();
        world
            .add_entity(Entity::new("lamp", "lamp").on("test.poke", move |event, _| {
                seen.lock().unwrap().push(event.id());
                Ok(Vec::new())
            }))
            .unwrap();
        let mut processor = EventProcessor::bare(world, ProcessorOptions::default());

        let targeted = SemanticEvent::new("test.poke").with_target("lamp");
        let untargeted = SemanticEvent::new("test.poke");
        let elsewhere = SemanticEvent::new("test.poke").with_target("ghost");
        let targeted_id = targeted.id();
        processor.process_events(vec![untargeted, targeted, elsewhere]);

        assert_eq!(*calls.lock().unwrap(), vec![targeted_id]);
    }

    #[test]
    fn reactions_from_many_events_are_aggregated() {
        let mut world = World::default();
        world
            .add_entity(Entity::new("a", "a").on("test.poke", |_, _| {
                Ok(vec![SemanticEvent::new("test.a1").into(), SemanticEvent::new("test.a2").into()])
            }))
            .unwrap();
        world
            .add_entity(Entity::new("b", "b").on("test.poke", |_, _| Ok(vec![SemanticEvent::new("test.b1").into()])))
            .unwrap();
        let mut processor = EventProcessor::bare(world, ProcessorOptions::default());

        let result = processor.process_events(vec![
            SemanticEvent::new("test.poke").with_target("a"),
            SemanticEvent::new("test.poke").with_target("b"),
        ]);

        assert_eq!(types(&result.reactions), ["test.a1", "test.a2", "test.b1"]);
        assert_eq!(
            types(&result.applied),
            ["test.poke", "test.a1", "test.a2", "test.poke", "test.b1"]
        );
    }

    // -- ordering -----------------------------------------------------------

    #[test]
    fn reactions_are_processed_level_by_level() {
        let mut processor = EventProcessor::bare(World::default(), ProcessorOptions::default());
        processor.register_handler("root", |_, _| Ok(vec![SemanticEvent::new("a").into(), SemanticEvent::new("b").into()]));
        processor.register_handler("a", |_, _| Ok(vec![SemanticEvent::new("a.child").into()]));
        processor.register_handler("b", |_, _| Ok(vec![SemanticEvent::new("b.child").into()]));

        let result = processor.process_events(vec![SemanticEvent::new("root"), SemanticEvent::new("next")]);

        assert_eq!(
            types(&result.applied),
            ["root", "a", "b", "a.child", "b.child", "next"]
        );
        assert_eq!(types(&result.reactions), ["a", "b", "a.child", "b.child"]);
    }

    // -- story handlers -----------------------------------------------------

    #[test]
    fn story_handlers_run_after_entity_handlers() {
        let mut world = World::default();
        world
            .add_entity(Entity::new("door", "door").on("test.knock", |_, _| Ok(vec![SemanticEvent::new("from.entity").into()])))
            .unwrap();
        let mut processor = EventProcessor::bare(world, ProcessorOptions::default());
        processor.register_handler("test.knock", |_, _| Ok(vec![SemanticEvent::new("from.story").into()]));

        let result = processor.process_event(SemanticEvent::new("test.knock").with_target("door"));
        assert_eq!(types(&result.reactions), ["from.entity", "from.story"]);
    }

    #[test]
    fn failing_story_handler_is_isolated() {
        let mut processor = EventProcessor::bare(World::default(), ProcessorOptions::default());
        processor.register_handler("test.tick", |_, _| Err(HandlerError::msg("story bug")));
        processor.register_handler("test.tick", |_, _| Ok(vec![SemanticEvent::new("test.tock").into()]));

        let result = processor.process_event(SemanticEvent::new("test.tick"));
        assert_eq!(types(&result.applied), ["test.tick", "test.tock"]);
        assert!(result.failed.is_empty());
    }

    #[test]
    fn unregistered_story_handler_stops_running() {
        let mut processor = EventProcessor::bare(World::default(), ProcessorOptions::default());
        let handler = processor.register_handler("test.tick", |_, _| Ok(vec![SemanticEvent::new("test.tock").into()]));
        assert!(processor.unregister_handler("test.tick", handler));
        assert!(!processor.story_handlers().has("test.tick"));

        let result = processor.process_event(SemanticEvent::new("test.tick"));
        assert!(result.reactions.is_empty());
    }

    // -- effects ------------------------------------------------------------

    /// A hall holding a lamp, with `handler` on the lamp for `test.poke`.
    fn lamp_world<F>(handler: F) -> World
    where
        F: Fn(&SemanticEvent, &mut World) -> HandlerResult<Vec<Reaction>> + Send + Sync + 'static,
    {
        let mut world = World::default();
        let hall = world.add_entity(Entity::new("hall", "hall").room()).unwrap();
        world
            .add_entity_at(Entity::new("lamp", "lamp").on("test.poke", handler), &hall)
            .unwrap();
        world
    }

    #[test]
    fn rejected_effect_batch_changes_nothing() {
        let world = lamp_world(|_, _| {
            Ok(vec![
                Effect::Flag {
                    name: "lit".into(),
                    value: true,
                }
                .into(),
                Effect::MoveEntity {
                    entity: id("lamp"),
                    destination: id("nowhere"),
                }
                .into(),
                SemanticEvent::new("test.flicker").into(),
            ])
        });
        let mut processor = EventProcessor::bare(world, ProcessorOptions::default());

        let (result, logs) =
            capture_logs(|| processor.process_event(SemanticEvent::new("test.poke").with_target("lamp")));

        assert_eq!(types(&result.applied), ["test.poke", "test.flicker"]);
        assert!(result.failed.is_empty());
        assert_eq!(result.rejected_effects.len(), 1);
        assert_eq!(result.rejected_effects[0].effect.kind(), "move_entity");
        assert!(logs.contains("effects rejected"), "logs: {logs}");
        let world = processor.world();
        assert_eq!(world.state_value("lit"), None);
        assert_eq!(world.get_location(&id("lamp")), Some(&id("hall")));
    }

    #[test]
    fn emitted_events_cascade_as_reactions() {
        let mut world = lamp_world(|_, _| {
            Ok(vec![
                Effect::Flag {
                    name: "lit".into(),
                    value: true,
                }
                .into(),
                Effect::Emit {
                    event: SemanticEvent::new("test.glow").with_target("lamp"),
                }
                .into(),
            ])
        });
        world
            .add_entity_handler(
                &id("lamp"),
                "test.glow",
                tw_world::entity_handler(|_, _| Ok(vec![Effect::Score { points: 5 }.into()])),
            )
            .unwrap();
        let mut processor = EventProcessor::new(world, ProcessorOptions::default());
        processor.register_handler("test.glow", |_, _| Ok(vec![SemanticEvent::new("test.warm").into()]));

        let result = processor.process_event(SemanticEvent::new("test.poke").with_target("lamp"));

        assert!(result.all_applied());
        assert!(result.rejected_effects.is_empty());
        assert_eq!(types(&result.applied), ["test.poke", "test.glow", "test.warm"]);
        assert_eq!(types(&result.reactions), ["test.glow", "test.warm"]);
        let world = processor.world();
        assert_eq!(world.state_value("lit"), Some(&serde_json::Value::Bool(true)));
        assert_eq!(world.state_value("score"), Some(&serde_json::Value::from(5)));
    }

    #[test]
    fn emitted_events_count_toward_the_depth_bound() {
        let world = lamp_world(|_, _| {
            Ok(vec![
                Effect::Emit {
                    event: SemanticEvent::new("test.poke").with_target("lamp"),
                }
                .into(),
            ])
        });
        let mut processor = EventProcessor::bare(world, ProcessorOptions::default().with_max_reaction_depth(3));

        let result = processor.process_event(SemanticEvent::new("test.poke").with_target("lamp"));
        assert_eq!(result.applied.len(), 4);
    }

    // -- scenarios ----------------------------------------------------------

    #[test]
    fn cursed_artifact_reacts_to_being_taken() {
        let mut world = World::default();
        let hall = world.add_entity(Entity::new("hall", "hall").room()).unwrap();
        world
            .add_entity_at(Entity::new("player", "you").actor(true), &hall)
            .unwrap();
        world
            .add_entity_at(
                Entity::new("idol", "cursed idol").on(TAKEN, |event, _| {
                    let actor = event.require_actor()?.clone();
                    Ok(vec![
                        SemanticEvent::new(STATE_CHANGED)
                            .with_target(actor)
                            .with_field("property", "cursed")
                            .with_field("newValue", true)
                            .into(),
                    ])
                }),
                &hall,
            )
            .unwrap();
        let mut processor = EventProcessor::new(world, ProcessorOptions::default());

        let result = processor.process_event(
            SemanticEvent::new(TAKEN)
                .with_target("idol")
                .with_actor("player"),
        );

        assert!(result.all_applied());
        assert_eq!(result.applied.len(), 2);
        assert_eq!(result.reactions.len(), 1);
        let world = processor.world();
        assert_eq!(world.get_location(&id("idol")), Some(&id("player")));
        assert!(world.get_entity(&id("player")).unwrap().flag("cursed"));
    }

    #[test]
    fn opened_event_opens_the_target() {
        let mut world = World::default();
        world
            .add_entity(Entity::new("chest", "chest").openable(false))
            .unwrap();
        let mut processor = EventProcessor::new(world, ProcessorOptions::default());

        let result = processor.process_event(SemanticEvent::new(OPENED).with_target("chest"));

        assert_eq!(result.applied.len(), 1);
        let chest = processor.world().get_entity(&id("chest")).unwrap();
        assert!(chest.traits.openable.as_ref().unwrap().is_open);
    }

    #[test]
    fn opened_event_fails_for_non_openable_target() {
        let mut world = World::default();
        world.add_entity(Entity::new("rock", "rock")).unwrap();
        let mut processor = EventProcessor::new(world, ProcessorOptions::default());

        let result = processor.process_event(SemanticEvent::new(OPENED).with_target("rock"));
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.failed[0].reason, "Event validation failed");

        processor.set_options(ProcessorOptions::default().with_validation(false));
        let result = processor.process_event(SemanticEvent::new(OPENED).with_target("rock"));
        assert_eq!(result.failed[0].reason, "rock is not openable");
    }

    #[test]
    fn world_can_be_recovered() {
        let processor = EventProcessor::new(World::default(), ProcessorOptions::default());
        let world = processor.into_world();
        assert!(world.has_event_handler(OPENED));
    }
}
