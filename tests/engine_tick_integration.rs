//! Engine tick integration tests: callback ordering, walks and tweens driven
//! through the real schedule.

use std::sync::{Arc, Mutex};

use bevy_ecs::prelude::*;
use glam::Vec2;

use wayfarer::actor::{go_to, spawn_actor, start_pos_animation};
use wayfarer::components::actor::Actor;
use wayfarer::components::animation::Animation;
use wayfarer::components::mapposition::MapPosition;
use wayfarer::components::postween::PosTween;
use wayfarer::components::tween::RepeatMode;
use wayfarer::components::walktween::WalkPath;
use wayfarer::game::{build_schedule, build_world, tick};
use wayfarer::resources::animationstore::AnimationStore;
use wayfarer::resources::callbackqueue::{ActionCallback, ActionCallbackQueue};
use wayfarer::resources::gameconfig::GameConfig;
use wayfarer::resources::navgraph::{NavGraph, PathFinder};
use wayfarer::resources::timers::Timers;

const EPSILON: f32 = 1e-4;

fn vec_approx_eq(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < EPSILON
}

type Log = Arc<Mutex<Vec<String>>>;

fn recorder(log: &Log, name: &str) -> ActionCallback {
    let log = log.clone();
    let name = name.to_string();
    ActionCallback::new(move |_w: &mut World| log.lock().unwrap().push(name.clone()))
}

/// Goes right, then down: `from → (from.x + 10, from.y) → to`.
struct LPath;

impl PathFinder for LPath {
    fn find_path(&self, from: Vec2, to: Vec2) -> Option<WalkPath> {
        Some(WalkPath::from_slice(&[from, Vec2::new(to.x, from.y), to]))
    }
}

fn make_world(walking_speed: f32) -> (World, Schedule) {
    let mut config = GameConfig::new();
    config.walking_speed = walking_speed;
    let mut world = build_world(config);
    world.insert_resource(AnimationStore::new().with_directional_set("hero", 4, 8.0));
    (world, build_schedule())
}

#[test]
fn callbacks_run_in_queue_order_with_nested_last() {
    let (mut world, mut schedule) = make_world(10.0);
    let log: Log = Arc::new(Mutex::new(Vec::new()));

    let d = recorder(&log, "D");
    let a_log = log.clone();
    let a = ActionCallback::new(move |w: &mut World| {
        a_log.lock().unwrap().push("A".to_string());
        w.resource_mut::<ActionCallbackQueue>().add(d.clone());
    });

    {
        let mut queue = world.resource_mut::<ActionCallbackQueue>();
        queue.add(a);
        queue.add(recorder(&log, "B"));
        queue.add(recorder(&log, "C"));
    }

    assert_eq!(tick(&mut world, &mut schedule, 0.016), 4);
    assert_eq!(*log.lock().unwrap(), vec!["A", "B", "C", "D"]);
    assert!(world.resource::<ActionCallbackQueue>().is_empty());
}

#[test]
fn callbacks_see_every_system_of_the_tick() {
    let (mut world, mut schedule) = make_world(10.0);
    let hero = spawn_actor(&mut world, "hero", Vec2::ZERO);

    start_pos_animation(
        &mut world,
        hero,
        RepeatMode::NoRepeat,
        1,
        1.0,
        Vec2::new(10.0, 0.0),
        None,
        None,
    )
    .unwrap();

    // the timer system runs before the tween system, but its callback must
    // observe the tween's final position
    let seen = Arc::new(Mutex::new(None));
    let seen_in_cb = seen.clone();
    world.resource_mut::<Timers>().add_timer(
        1.0,
        ActionCallback::new(move |w: &mut World| {
            let pos = w.get::<MapPosition>(hero).map(|p| p.pos);
            *seen_in_cb.lock().unwrap() = pos;
        }),
    );

    tick(&mut world, &mut schedule, 0.5);
    assert!(seen.lock().unwrap().is_none());
    tick(&mut world, &mut schedule, 0.5);

    let seen = seen.lock().unwrap().unwrap();
    assert!(vec_approx_eq(seen, Vec2::new(10.0, 0.0)));
    assert!(world.get::<PosTween>(hero).is_none());
}

#[test]
fn l_shaped_walk_times_each_segment() {
    let (mut world, mut schedule) = make_world(10.0);
    world.insert_resource(NavGraph::new(LPath));
    let hero = spawn_actor(&mut world, "hero", Vec2::ZERO);
    assert_eq!(world.get::<Actor>(hero).unwrap().walking_speed, 10.0);

    let log: Log = Arc::new(Mutex::new(Vec::new()));
    go_to(&mut world, hero, Vec2::new(10.0, 10.0), Some(recorder(&log, "arrived"))).unwrap();
    assert_eq!(world.get::<Animation>(hero).unwrap().animation_key, "walk.right");

    tick(&mut world, &mut schedule, 0.5);
    assert!(vec_approx_eq(
        world.get::<MapPosition>(hero).unwrap().pos,
        Vec2::new(5.0, 0.0)
    ));

    tick(&mut world, &mut schedule, 0.5);
    tick(&mut world, &mut schedule, 0.5);
    assert!(vec_approx_eq(
        world.get::<MapPosition>(hero).unwrap().pos,
        Vec2::new(10.0, 5.0)
    ));
    assert!(log.lock().unwrap().is_empty());

    tick(&mut world, &mut schedule, 0.5);
    assert_eq!(*log.lock().unwrap(), vec!["arrived"]);
    assert!(vec_approx_eq(
        world.get::<MapPosition>(hero).unwrap().pos,
        Vec2::new(10.0, 10.0)
    ));
    assert!(world.get::<PosTween>(hero).is_none());
    assert!(
        world
            .get::<Animation>(hero)
            .unwrap()
            .animation_key
            .starts_with("stand.")
    );

    tick(&mut world, &mut schedule, 0.5);
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[test]
fn new_goto_supersedes_walk_without_firing() {
    let (mut world, mut schedule) = make_world(10.0);
    let hero = spawn_actor(&mut world, "hero", Vec2::ZERO);
    let log: Log = Arc::new(Mutex::new(Vec::new()));

    go_to(&mut world, hero, Vec2::new(100.0, 0.0), Some(recorder(&log, "first"))).unwrap();
    tick(&mut world, &mut schedule, 0.5);
    go_to(&mut world, hero, Vec2::new(5.0, 10.0), Some(recorder(&log, "second"))).unwrap();

    for _ in 0..40 {
        tick(&mut world, &mut schedule, 0.1);
    }
    assert_eq!(*log.lock().unwrap(), vec!["second"]);
}
