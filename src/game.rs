//! World setup and the per-tick driver.
//!
//! [`build_world`] inserts every resource the update systems read, and
//! [`build_schedule`] orders those systems. [`tick`] is the only place time
//! moves forward:
//!
//! 1. advance [`WorldTime`] by the (scaled) frame delta
//! 2. run the update schedule; tweens, timers, animations and the transition
//!    push completion callbacks onto the queue but never run them
//! 3. drain the queue with [`dispatch_callbacks`], resuming suspended actions
//!    off the stack of whatever completed them
//! 4. clear change trackers for the next frame

use bevy_ecs::prelude::*;

use crate::actions::ActionFactory;
use crate::resources::animationstore::AnimationStore;
use crate::resources::callbackqueue::ActionCallbackQueue;
use crate::resources::callbackregistry::CallbackRegistry;
use crate::resources::gameconfig::GameConfig;
use crate::resources::inventory::Inventory;
use crate::resources::navgraph::NavGraph;
use crate::resources::timers::Timers;
use crate::resources::transition::Transition;
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation;
use crate::systems::callbacks::dispatch_callbacks;
use crate::systems::time::{update_timers, update_world_time};
use crate::systems::transition::transition_system;
use crate::systems::tween::{tween_pos_system, tween_scale_system};

/// A world with every engine resource in place.
pub fn build_world(config: GameConfig) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
    world.insert_resource(WorldSignals::default());
    world.insert_resource(ActionCallbackQueue::new());
    world.insert_resource(CallbackRegistry::new());
    world.insert_resource(ActionFactory::with_defaults());
    world.insert_resource(Timers::new());
    world.insert_resource(Transition::new());
    world.insert_resource(AnimationStore::new());
    world.insert_resource(NavGraph::default());
    world.insert_resource(Inventory::new());
    world.insert_resource(config);
    world
}

/// The update schedule. Systems only queue callbacks; they never run them.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            update_timers,
            animation,
            tween_pos_system,
            tween_scale_system,
            transition_system,
        )
            .chain(),
    );
    update
}

/// Advance the world by `dt` seconds, then run every queued callback.
///
/// Returns the number of callbacks dispatched.
pub fn tick(world: &mut World, schedule: &mut Schedule, dt: f32) -> usize {
    update_world_time(world, dt);
    schedule.run(world);
    let ran = dispatch_callbacks(world);
    world.clear_trackers();
    ran
}
