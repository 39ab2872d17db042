//! Tween animation systems.
//!
//! These systems advance the actor tween slots once per tick:
//! - [`tween_pos_system`] – advances [`PosTween`] (straight moves and walks)
//!   and writes [`MapPosition`], turning and re-animating walking actors
//! - [`tween_scale_system`] – advances [`ScaleTween`] and writes [`Scale`]
//!
//! Completion callbacks are pushed onto the
//! [`ActionCallbackQueue`](crate::resources::callbackqueue::ActionCallbackQueue);
//! they run in [`dispatch_callbacks`](crate::systems::callbacks::dispatch_callbacks)
//! after the schedule. A finished tween component is removed.

use bevy_ecs::prelude::*;

use crate::actor::ActorView;
use crate::components::animation::Animation;
use crate::components::facing::Facing;
use crate::components::mapposition::MapPosition;
use crate::components::postween::PosTween;
use crate::components::scale::Scale;
use crate::components::scaletween::ScaleTween;
use crate::resources::animationstore::AnimationStore;
use crate::resources::callbackqueue::ActionCallbackQueue;
use crate::resources::worldtime::WorldTime;

/// Animate actor positions based on [`PosTween`] components.
pub fn tween_pos_system(
    world_time: Res<WorldTime>,
    store: Res<AnimationStore>,
    mut queue: ResMut<ActionCallbackQueue>,
    mut query: Query<(
        Entity,
        &mut PosTween,
        &mut MapPosition,
        Option<&mut Facing>,
        Option<&mut Animation>,
    )>,
    mut commands: Commands,
) {
    let dt = world_time.delta.max(0.0);
    for (entity, mut tween, mut position, mut facing, mut animation) in query.iter_mut() {
        let mut view = ActorView {
            position: &mut *position,
            facing: facing.as_deref_mut(),
            animation: animation.as_deref_mut(),
            store: &*store,
        };
        tween.update(&mut view, dt, &mut queue);
        if tween.is_complete() {
            commands.entity(entity).remove::<PosTween>();
        }
    }
}

/// Animate actor scale based on [`ScaleTween`] components.
pub fn tween_scale_system(
    world_time: Res<WorldTime>,
    mut queue: ResMut<ActionCallbackQueue>,
    mut query: Query<(Entity, &mut ScaleTween, &mut Scale)>,
    mut commands: Commands,
) {
    let dt = world_time.delta.max(0.0);
    for (entity, mut tween, mut scale) in query.iter_mut() {
        tween.0.update(&mut *scale, dt, &mut queue);
        if tween.0.is_complete() {
            commands.entity(entity).remove::<ScaleTween>();
        }
    }
}
