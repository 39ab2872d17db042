//! Time update systems.
//!
//! - [`update_world_time`] updates the shared
//!   [`WorldTime`](crate::resources::worldtime::WorldTime) resource once per
//!   frame, applying `time_scale` to the provided delta.
//! - [`update_timers`] advances the one-shot [`Timers`] with the scaled delta.
use bevy_ecs::prelude::*;

use crate::resources::callbackqueue::ActionCallbackQueue;
use crate::resources::timers::Timers;
use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The system
/// applies the current `time_scale` and writes both `elapsed` and `delta`.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
}

/// Advance timers and queue the callbacks of those that ran out.
pub fn update_timers(
    world_time: Res<WorldTime>,
    mut timers: ResMut<Timers>,
    mut queue: ResMut<ActionCallbackQueue>,
) {
    timers.update(world_time.delta, &mut queue);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_scale_applies_to_delta() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(0.5));
        update_world_time(&mut world, 0.2);
        update_world_time(&mut world, 0.2);
        let wt = world.resource::<WorldTime>();
        assert!((wt.delta - 0.1).abs() < 1e-6);
        assert!((wt.elapsed - 0.2).abs() < 1e-6);
    }
}
