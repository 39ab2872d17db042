//! Animation clip playback.
//!
//! [`Animation`] holds the key of the clip an actor is showing and a [`Tween`]
//! that times its playback. The clip's frame count and fps come from the
//! [`AnimationStore`]; one play of a clip lasts `frame_count / fps` seconds
//! and the tween's repeat mode decides what happens after it.
//!
//! Starting a clip with a callback makes it a suspension point: the callback
//! is queued when the tween completes, which for looping clips is never.

use bevy_ecs::prelude::Component;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::components::tween::{RepeatMode, Tween, TweenState};
use crate::resources::animationstore::{AnimationResource, AnimationStore};
use crate::resources::callbackqueue::{ActionCallback, ActionCallbackQueue};
use crate::resources::callbackregistry::CallbackRegistry;

#[derive(Debug, Clone, Component, Default)]
pub struct Animation {
    pub animation_key: String,
    pub frame_index: usize,
    tween: Tween,
}

impl Animation {
    /// Start showing `key`, looked up in `store`.
    ///
    /// [`RepeatMode::FromCurrent`] resolves to the clip's own repeat mode and
    /// count. A clip missing from the store completes on the next update.
    pub fn new(key: impl Into<String>, store: &AnimationStore) -> Self {
        let mut anim = Self::default();
        anim.play(key, store, RepeatMode::FromCurrent, 1, None);
        anim
    }

    pub fn play(
        &mut self,
        key: impl Into<String>,
        store: &AnimationStore,
        repeat: RepeatMode,
        count: i32,
        cb: Option<ActionCallback>,
    ) {
        self.animation_key = key.into();
        self.frame_index = 0;

        match store.get(&self.animation_key) {
            Some(clip) => {
                let (repeat, count) = match repeat {
                    RepeatMode::FromCurrent => (clip.repeat, clip.count),
                    other => (other, count),
                };
                self.tween.reset();
                self.tween.start(clip.duration(), repeat, count, None, cb);
            }
            None => {
                warn!("animation '{}' not found", self.animation_key);
                self.tween.reset();
                self.tween.start(0.0, RepeatMode::NoRepeat, 1, None, cb);
            }
        }
    }

    /// Advance playback and recompute the visible frame.
    pub fn update(&mut self, store: &AnimationStore, delta: f32, queue: &mut ActionCallbackQueue) {
        self.tween.update(delta, queue);
        if let Some(clip) = store.get(&self.animation_key) {
            self.frame_index = frame_at(clip, self.tween.percent());
        }
    }

    pub fn is_complete(&self) -> bool {
        self.tween.is_complete()
    }

    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    pub fn write(&self, registry: &CallbackRegistry) -> AnimationState {
        AnimationState {
            animation_key: self.animation_key.clone(),
            frame_index: self.frame_index,
            tween: self.tween.write(registry),
        }
    }
}

fn frame_at(clip: &AnimationResource, percent: f32) -> usize {
    if clip.frame_count == 0 {
        return 0;
    }
    ((percent * clip.frame_count as f32) as usize).min(clip.frame_count - 1)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationState {
    pub animation_key: String,
    pub frame_index: usize,
    pub tween: TweenState,
}

impl AnimationState {
    pub fn read(&self) -> Animation {
        Animation {
            animation_key: self.animation_key.clone(),
            frame_index: self.frame_index,
            tween: self.tween.read(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::tween::INFINITY;
    use bevy_ecs::prelude::World;

    fn store() -> AnimationStore {
        let mut store = AnimationStore::new();
        store.insert("pickup", AnimationResource::once("hero", 4, 4.0));
        store.insert("idle", AnimationResource::looped("hero", 2, 2.0));
        store
    }

    #[test]
    fn test_once_clip_queues_callback_at_end() {
        let store = store();
        let mut queue = ActionCallbackQueue::new();
        let mut anim = Animation::default();
        let cb = ActionCallback::new(|_w: &mut World| {});
        anim.play("pickup", &store, RepeatMode::FromCurrent, 1, Some(cb));

        anim.update(&store, 0.5, &mut queue);
        assert_eq!(anim.frame_index, 2);
        assert!(queue.is_empty());
        anim.update(&store, 0.5, &mut queue);
        assert!(anim.is_complete());
        assert_eq!(anim.frame_index, 3);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_from_current_uses_clip_mode() {
        let store = store();
        let anim = Animation::new("idle", &store);
        assert_eq!(anim.tween().repeat_mode(), RepeatMode::Repeat);
        assert_eq!(anim.tween().count(), INFINITY);
    }

    #[test]
    fn test_explicit_mode_overrides_clip() {
        let store = store();
        let mut queue = ActionCallbackQueue::new();
        let mut anim = Animation::default();
        let cb = ActionCallback::new(|_w: &mut World| {});
        anim.play("idle", &store, RepeatMode::Repeat, 2, Some(cb));
        anim.update(&store, 1.0, &mut queue);
        assert!(queue.is_empty());
        anim.update(&store, 1.0, &mut queue);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_missing_clip_completes_on_first_update() {
        let store = store();
        let mut queue = ActionCallbackQueue::new();
        let mut anim = Animation::default();
        let cb = ActionCallback::new(|_w: &mut World| {});
        anim.play("dance", &store, RepeatMode::FromCurrent, 1, Some(cb));
        assert_eq!(anim.animation_key, "dance");
        anim.update(&store, 0.016, &mut queue);
        assert_eq!(queue.len(), 1);
    }
}
