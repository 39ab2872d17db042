//! Positional tweens.
//!
//! An actor has a single positional slot, the [`PosTween`] component. It holds
//! either a straight [`SpritePosTween`] or a [`WalkTween`] following a path.
//! Inserting a new `PosTween` overwrites the previous one, which is how a new
//! movement command silently cancels the old one: the replaced tween's
//! callback never fires.
//!
//! See [`crate::systems::tween::tween_pos_system`] for the update system.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::mapposition::MapPosition;
use crate::components::tween::{Easing, RepeatMode, Tween, TweenState};
use crate::components::walktween::{WalkTarget, WalkTween, WalkTweenState};
use crate::resources::callbackqueue::{ActionCallback, ActionCallbackQueue};
use crate::resources::callbackregistry::CallbackRegistry;

/// Something whose position can be animated.
pub trait PositionTarget {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, pos: Vec2);
}

impl PositionTarget for MapPosition {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }
}

/// Moves a target in a straight line from where it was at start time.
#[derive(Clone, Debug, Default)]
pub struct SpritePosTween {
    tween: Tween,
    start: Vec2,
    target: Vec2,
}

impl SpritePosTween {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the target's current position and start moving to `dest`.
    #[allow(clippy::too_many_arguments)]
    pub fn start(
        &mut self,
        target: &impl PositionTarget,
        repeat: RepeatMode,
        count: i32,
        dest: Vec2,
        duration: f32,
        interpolation: Option<Easing>,
        cb: Option<ActionCallback>,
    ) {
        self.start = target.position();
        self.target = dest;
        self.tween.start(duration, repeat, count, interpolation, cb);
    }

    /// Advance and write the interpolated position to the target.
    pub fn update(
        &mut self,
        target: &mut impl PositionTarget,
        delta: f32,
        queue: &mut ActionCallbackQueue,
    ) {
        self.tween.update(delta, queue);
        let percent = self.tween.percent();
        target.set_position(self.start + (self.target - self.start) * percent);
    }

    pub fn is_complete(&self) -> bool {
        self.tween.is_complete()
    }

    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    pub fn tween_mut(&mut self) -> &mut Tween {
        &mut self.tween
    }

    pub fn start_value(&self) -> Vec2 {
        self.start
    }

    pub fn target_value(&self) -> Vec2 {
        self.target
    }

    pub fn write(&self, registry: &CallbackRegistry) -> SpritePosTweenState {
        SpritePosTweenState {
            tween: self.tween.write(registry),
            start: self.start,
            target: self.target,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpritePosTweenState {
    pub tween: TweenState,
    pub start: Vec2,
    pub target: Vec2,
}

impl SpritePosTweenState {
    pub fn read(&self) -> SpritePosTween {
        SpritePosTween {
            tween: self.tween.read(),
            start: self.start,
            target: self.target,
        }
    }
}

/// The positional tween slot of an actor.
#[derive(Component, Clone, Debug)]
pub enum PosTween {
    Sprite(SpritePosTween),
    Walk(WalkTween),
}

impl PosTween {
    pub fn is_complete(&self) -> bool {
        match self {
            PosTween::Sprite(tw) => tw.is_complete(),
            PosTween::Walk(walk) => walk.is_complete(),
        }
    }

    pub fn is_walk(&self) -> bool {
        matches!(self, PosTween::Walk(_))
    }

    /// Advance whichever tween occupies the slot.
    pub fn update(
        &mut self,
        target: &mut impl WalkTarget,
        delta: f32,
        queue: &mut ActionCallbackQueue,
    ) {
        match self {
            PosTween::Sprite(tw) => tw.update(target, delta, queue),
            PosTween::Walk(walk) => walk.update(target, delta, queue),
        }
    }

    pub fn write(&self, registry: &CallbackRegistry) -> PosTweenState {
        match self {
            PosTween::Sprite(tw) => PosTweenState::Sprite(tw.write(registry)),
            PosTween::Walk(walk) => PosTweenState::Walk(walk.write(registry)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PosTweenState {
    Sprite(SpritePosTweenState),
    Walk(WalkTweenState),
}

impl PosTweenState {
    pub fn read(&self) -> PosTween {
        match self {
            PosTweenState::Sprite(state) => PosTween::Sprite(state.read()),
            PosTweenState::Walk(state) => PosTween::Walk(state.read()),
        }
    }
}
