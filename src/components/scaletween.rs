//! Scale tweens.
//!
//! Mirrors [`crate::components::postween`] for the actor's uniform scale. An
//! actor has one scale slot, the [`ScaleTween`] component; inserting a new one
//! supersedes the old without queuing its callback.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::scale::Scale;
use crate::components::tween::{Easing, RepeatMode, Tween, TweenState};
use crate::resources::callbackqueue::{ActionCallback, ActionCallbackQueue};
use crate::resources::callbackregistry::CallbackRegistry;

/// Something whose scale can be animated.
pub trait ScaleTarget {
    fn scale(&self) -> f32;
    fn set_scale(&mut self, scale: f32);
}

impl ScaleTarget for Scale {
    fn scale(&self) -> f32 {
        self.scale
    }
    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }
}

#[derive(Clone, Debug, Default)]
pub struct SpriteScaleTween {
    tween: Tween,
    start: f32,
    target: f32,
}

impl SpriteScaleTween {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn start(
        &mut self,
        target: &impl ScaleTarget,
        repeat: RepeatMode,
        count: i32,
        scale: f32,
        duration: f32,
        interpolation: Option<Easing>,
        cb: Option<ActionCallback>,
    ) {
        self.start = target.scale();
        self.target = scale;
        self.tween.start(duration, repeat, count, interpolation, cb);
    }

    pub fn update(
        &mut self,
        target: &mut impl ScaleTarget,
        delta: f32,
        queue: &mut ActionCallbackQueue,
    ) {
        self.tween.update(delta, queue);
        let percent = self.tween.percent();
        target.set_scale(self.start + (self.target - self.start) * percent);
    }

    pub fn is_complete(&self) -> bool {
        self.tween.is_complete()
    }

    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    pub fn start_value(&self) -> f32 {
        self.start
    }

    pub fn target_value(&self) -> f32 {
        self.target
    }
}

/// The scale tween slot of an actor.
#[derive(Component, Clone, Debug, Default)]
pub struct ScaleTween(pub SpriteScaleTween);

impl ScaleTween {
    pub fn write(&self, registry: &CallbackRegistry) -> ScaleTweenState {
        ScaleTweenState {
            tween: self.0.tween.write(registry),
            start: self.0.start,
            target: self.0.target,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleTweenState {
    pub tween: TweenState,
    pub start: f32,
    pub target: f32,
}

impl ScaleTweenState {
    pub fn read(&self) -> ScaleTween {
        ScaleTween(SpriteScaleTween {
            tween: self.tween.read(),
            start: self.start,
            target: self.target,
        })
    }
}
