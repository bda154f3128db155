//! Story code adding its own action next to the standard set.

use tw_core::types::{ACTION_BLOCKED, ACTION_SUCCESS, PULLED, TAKEN};
use tw_core::{EntityId, SemanticEvent};
use tw_stdlib::{
    Action, ActionContext, ActionError, ActionKind, ActionMetadata, ActionRegistry, ActionResult,
    ParsedCommand, ValidationResult, event_data, run_action,
};
use tw_world::{Entity, World, WorldModel};

const PULLING: &str = "story.action.pulling";

const METADATA: ActionMetadata = ActionMetadata {
    id: PULLING,
    group: "story",
    required_messages: &["not_a_lever", "pulled"],
    requires_direct_object: true,
    requires_indirect_object: false,
};

struct PullLever;

impl Action for PullLever {
    fn metadata(&self) -> &ActionMetadata {
        &METADATA
    }

    fn validate(&self, ctx: &ActionContext<'_>) -> ValidationResult {
        match ctx.direct_object().and_then(|id| ctx.world.get_entity(id)) {
            Some(e) if e.property("lever").is_some() => ValidationResult::ok(),
            _ => ValidationResult::invalid("not_a_lever"),
        }
    }

    fn execute(&self, ctx: &mut ActionContext<'_>) -> ActionResult<()> {
        let lever = ctx.require_direct_object()?;
        ctx.world.update_entity(&lever, |e| {
            e.properties.insert("lever".into(), "down".into());
        })?;
        ctx.shared.insert("position", "down");
        Ok(())
    }

    fn report(
        &self,
        ctx: &ActionContext<'_>,
        validation: Option<&ValidationResult>,
        error: Option<&ActionError>,
    ) -> Vec<SemanticEvent> {
        if let Some(err) = error {
            return vec![ctx.execution_failed(err)];
        }
        if let Some(v) = validation.filter(|v| !v.valid) {
            return vec![ctx.validation_error(v)];
        }
        let position = ctx.shared.get_str("position").unwrap_or("up");
        vec![
            ctx.event(PULLED, event_data([("position", position.into())])),
            ctx.success("pulled", Default::default()),
        ]
    }

    fn blocked(&self, ctx: &ActionContext<'_>, validation: &ValidationResult) -> Option<Vec<SemanticEvent>> {
        Some(vec![ctx.blocked_event(validation)])
    }
}

fn world() -> World {
    let mut world = World::default();
    let cellar = world.add_entity(Entity::new("cellar", "Cellar").room()).unwrap();
    world
        .add_entity_at(Entity::new("player", "yourself").actor(true), &cellar)
        .unwrap();
    world
        .add_entity_at(Entity::new("lever", "rusty lever").with_property("lever", "up"), &cellar)
        .unwrap();
    world.add_entity_at(Entity::new("candle", "candle"), &cellar).unwrap();
    world
}

fn run(registry: &ActionRegistry, world: &mut World, command: &ParsedCommand) -> Vec<SemanticEvent> {
    let action = registry.get(&command.action).unwrap();
    run_action(action, world, command, &EntityId::from("player"))
}

fn types(events: &[SemanticEvent]) -> Vec<&str> {
    events.iter().map(|e| e.event_type()).collect()
}

#[test]
fn custom_action_runs_beside_the_standard_set() {
    let mut registry = ActionRegistry::standard();
    assert!(registry.register(ActionKind::phased(PullLever)).is_none());
    assert!(registry.in_group("story").any(|m| m.id == PULLING));

    let mut world = world();
    let events = run(&registry, &mut world, &ParsedCommand::new(PULLING).with_direct_object("lever"));
    assert_eq!(types(&events), [PULLED, ACTION_SUCCESS]);
    assert_eq!(events[0].get_str("position"), Some("down"));
    assert_eq!(events[0].target(), Some(&EntityId::from("lever")));

    let events = run(&registry, &mut world, &ParsedCommand::new(PULLING).with_direct_object("candle"));
    assert_eq!(types(&events), [ACTION_BLOCKED]);
    assert_eq!(events[0].get_str("error"), Some("not_a_lever"));

    let events = run(
        &registry,
        &mut world,
        &ParsedCommand::new(tw_stdlib::actions::TAKING).with_direct_object("candle"),
    );
    assert_eq!(types(&events), [TAKEN, ACTION_SUCCESS]);
    assert_eq!(
        world.get_location(&EntityId::from("candle")),
        Some(&EntityId::from("player"))
    );
}

#[test]
fn every_standard_action_declares_its_messages() {
    let registry = ActionRegistry::standard();
    assert_eq!(registry.len(), 9);
    for metadata in registry.metadata() {
        assert!(metadata.id.starts_with("if.action."), "{}", metadata.id);
        assert!(!metadata.required_messages.is_empty(), "{}", metadata.id);
    }
}
