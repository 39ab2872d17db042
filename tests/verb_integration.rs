//! Verb integration tests: actions suspending and resuming through the tick,
//! parameter binding, and a suspended verb surviving save and reload.

use bevy_ecs::prelude::*;
use glam::Vec2;

use wayfarer::actions::verb::{ActionState, Verb, find_verb, run_verb, spawn_verb};
use wayfarer::actions::{ActionFactory, ActionSpec};
use wayfarer::actor::spawn_actor;
use wayfarer::components::mapposition::MapPosition;
use wayfarer::components::scale::Scale;
use wayfarer::error::ParamError;
use wayfarer::game::{build_schedule, build_world, tick};
use wayfarer::resources::animationstore::AnimationStore;
use wayfarer::resources::callbackqueue::{ActionCallback, ActionCallbackQueue};
use wayfarer::resources::gameconfig::GameConfig;
use wayfarer::resources::inventory::Inventory;
use wayfarer::resources::transition::Transition;
use wayfarer::resources::worldsignals::WorldSignals;
use wayfarer::save;

fn make_world() -> (World, Schedule) {
    let mut config = GameConfig::new();
    config.walking_speed = 100.0;
    let mut world = build_world(config);
    world.insert_resource(AnimationStore::new().with_directional_set("hero", 4, 8.0));
    (world, build_schedule())
}

fn verb_state(world: &mut World, id: &str) -> (usize, ActionState) {
    let entity = find_verb(world, id).unwrap();
    let verb = world.get::<Verb>(entity).unwrap();
    (verb.ip, verb.state)
}

#[test]
fn synchronous_action_enqueues_nothing() {
    let (mut world, _) = make_world();
    world.resource_mut::<Inventory>().add_item("key");

    let factory = ActionFactory::with_defaults();
    let mut action = factory
        .create_bound(&ActionSpec::new("remove_inventory_item").with("id", "key"))
        .unwrap();

    assert!(action.run(&mut world, ActionCallback::new(|_w: &mut World| {})));
    assert!(world.resource::<ActionCallbackQueue>().is_empty());
    assert!(world.resource::<Inventory>().is_empty());
}

#[test]
fn binding_reports_missing_and_invalid_values() {
    let factory = ActionFactory::with_defaults();

    let missing = factory.create_bound(&ActionSpec::new("goto").with("actor", "hero"));
    assert!(matches!(
        missing,
        Err(ParamError::MissingParameter { param, .. }) if param == "pos"
    ));

    let malformed = factory.create_bound(
        &ActionSpec::new("goto")
            .with("actor", "hero")
            .with("pos", "10;20"),
    );
    assert!(matches!(
        malformed,
        Err(ParamError::InvalidValue { param, .. }) if param == "pos"
    ));

    let bad_option = factory.create_bound(&ActionSpec::new("transition").with("type", "wipe"));
    assert!(matches!(bad_option, Err(ParamError::InvalidOption { .. })));

    let defaults = factory.create_bound(&ActionSpec::new("wait"));
    assert!(defaults.is_ok());
}

#[test]
fn verb_runs_walk_wait_scale_fade_and_leave() {
    let (mut world, mut schedule) = make_world();
    let hero = spawn_actor(&mut world, "hero", Vec2::ZERO);
    spawn_verb(
        &mut world,
        Verb::new(
            "demo",
            vec![
                ActionSpec::new("goto")
                    .with("actor", "hero")
                    .with("pos", "100,0"),
                ActionSpec::new("wait").with("time", "0.5"),
                ActionSpec::new("scale")
                    .with("actor", "hero")
                    .with("scale", "2")
                    .with("duration", "0.5"),
                ActionSpec::new("transition")
                    .with("type", "fadeout")
                    .with("time", "0.5"),
                ActionSpec::new("leave").with("scene", "street"),
            ],
        ),
    );

    assert!(!run_verb(&mut world, "demo"));
    assert_eq!(verb_state(&mut world, "demo"), (0, ActionState::Pending));

    // walk: 1s at 100px/s
    for _ in 0..10 {
        tick(&mut world, &mut schedule, 0.1);
    }
    assert_eq!(world.get::<MapPosition>(hero).unwrap().pos, Vec2::new(100.0, 0.0));
    assert_eq!(verb_state(&mut world, "demo").0, 1);

    for _ in 0..5 {
        tick(&mut world, &mut schedule, 0.1);
    }
    assert_eq!(verb_state(&mut world, "demo").0, 2);

    for _ in 0..5 {
        tick(&mut world, &mut schedule, 0.1);
    }
    assert!((world.get::<Scale>(hero).unwrap().scale - 2.0).abs() < 1e-4);
    assert_eq!(verb_state(&mut world, "demo").0, 3);
    assert!(world.resource::<Transition>().is_active());

    for _ in 0..5 {
        tick(&mut world, &mut schedule, 0.1);
    }
    assert_eq!(verb_state(&mut world, "demo"), (4, ActionState::Pending));
    assert_eq!(world.resource::<WorldSignals>().current_scene(), Some("street"));
}

#[test]
fn suspended_verb_resumes_after_reload() {
    let (mut world, mut schedule) = make_world();
    world.resource_mut::<Inventory>().add_item("key");
    spawn_actor(&mut world, "hero", Vec2::ZERO);
    spawn_verb(
        &mut world,
        Verb::new(
            "walk",
            vec![
                ActionSpec::new("goto")
                    .with("actor", "hero")
                    .with("pos", "100,0"),
                ActionSpec::new("remove_inventory_item").with("id", "key"),
            ],
        ),
    );
    run_verb(&mut world, "walk");
    for _ in 0..3 {
        tick(&mut world, &mut schedule, 0.1);
    }

    let json = save::to_json(&save::write_world(&mut world)).unwrap();

    let (mut restored, mut schedule) = make_world();
    save::read_world(&mut restored, &save::from_json(&json).unwrap()).unwrap();
    assert_eq!(verb_state(&mut restored, "walk"), (0, ActionState::Pending));
    assert!(restored.resource::<Inventory>().contains("key"));

    for _ in 0..8 {
        tick(&mut restored, &mut schedule, 0.1);
    }
    assert_eq!(verb_state(&mut restored, "walk"), (2, ActionState::Done));
    assert!(restored.resource::<Inventory>().is_empty());
}
