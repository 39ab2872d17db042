//! Animation system.
//!
//! [`animation`] advances clip playback on every [`Animation`] component and
//! updates the visible frame index.
//!
//! # Animation Flow
//!
//! 1. Clip data is defined in [`AnimationStore`](crate::resources::animationstore::AnimationStore)
//! 2. Actors have an [`Animation`](crate::components::animation::Animation) component pointing to a key
//! 3. The `animation` system advances the clip's tween and recomputes `frame_index`
//! 4. A clip started with a callback queues it when its tween completes

use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::resources::animationstore::AnimationStore;
use crate::resources::callbackqueue::ActionCallbackQueue;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback.
///
/// Contract
/// - Reads [`WorldTime`] for the scaled delta.
/// - Looks up clip data from [`AnimationStore`].
/// - Mutates [`Animation`] component state.
/// - Pushes completion callbacks to the [`ActionCallbackQueue`].
pub fn animation(
    mut query: Query<&mut Animation>,
    animation_store: Res<AnimationStore>,
    time: Res<WorldTime>,
    mut queue: ResMut<ActionCallbackQueue>,
) {
    for mut anim in query.iter_mut() {
        if anim.is_complete() {
            continue;
        }
        anim.update(&animation_store, time.delta, &mut queue);
    }
}
