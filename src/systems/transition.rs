//! Scene transition system.
//!
//! Advances the [`Transition`] overlay by the frame delta.

use bevy_ecs::prelude::*;

use crate::resources::callbackqueue::ActionCallbackQueue;
use crate::resources::transition::Transition;
use crate::resources::worldtime::WorldTime;

pub fn transition_system(
    world_time: Res<WorldTime>,
    mut transition: ResMut<Transition>,
    mut queue: ResMut<ActionCallbackQueue>,
) {
    transition.update(world_time.delta, &mut queue);
}
