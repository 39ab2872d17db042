//! Animation resource registry.
//!
//! This module provides a minimal store for animation clip definitions that
//! can be reused by multiple actors. Systems look up a clip by its string key
//! (`walk.left`, `stand.front`, `pickup`, ...) and drive playback based on the
//! immutable parameters stored here.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::components::tween::RepeatMode;

/// Central registry of reusable animation clips keyed by string IDs.
#[derive(Resource, Default, Debug, Clone)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, AnimationResource>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, clip: AnimationResource) {
        self.animations.insert(key.into(), clip);
    }

    pub fn get(&self, key: &str) -> Option<&AnimationResource> {
        self.animations.get(key)
    }

    /// Register looping `walk.<dir>` and `stand.<dir>` clips for every
    /// direction, all drawn from `tex_key`.
    pub fn with_directional_set(mut self, tex_key: &str, frame_count: usize, fps: f32) -> Self {
        use crate::components::facing::Direction;
        const ALL: [Direction; 8] = [
            Direction::Front,
            Direction::FrontRight,
            Direction::Right,
            Direction::BackRight,
            Direction::Back,
            Direction::BackLeft,
            Direction::Left,
            Direction::FrontLeft,
        ];
        for dir in ALL {
            self.insert(
                format!("walk.{}", dir.name()),
                AnimationResource::looped(tex_key, frame_count, fps),
            );
            self.insert(
                format!("stand.{}", dir.name()),
                AnimationResource::looped(tex_key, 1, fps),
            );
        }
        self
    }
}

/// Immutable data describing a sprite-sheet animation clip.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationResource {
    /// Texture key the renderer draws the frames from.
    pub tex_key: Arc<str>,
    /// Number of frames in the clip.
    pub frame_count: usize,
    /// Frames per second playback speed.
    pub fps: f32,
    /// Repeat mode used when a clip is started with [`RepeatMode::FromCurrent`].
    pub repeat: RepeatMode,
    /// Play count used together with `repeat`.
    pub count: i32,
}

impl AnimationResource {
    /// A clip that plays once.
    pub fn once(tex_key: &str, frame_count: usize, fps: f32) -> Self {
        Self {
            tex_key: Arc::from(tex_key),
            frame_count,
            fps,
            repeat: RepeatMode::NoRepeat,
            count: 1,
        }
    }

    /// A clip that loops forever.
    pub fn looped(tex_key: &str, frame_count: usize, fps: f32) -> Self {
        Self {
            repeat: RepeatMode::Repeat,
            count: crate::components::tween::INFINITY,
            ..Self::once(tex_key, frame_count, fps)
        }
    }

    /// Length of one play in seconds.
    pub fn duration(&self) -> f32 {
        if self.fps <= 0.0 {
            return 0.0;
        }
        self.frame_count as f32 / self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_from_frames_and_fps() {
        let clip = AnimationResource::once("hero", 12, 24.0);
        assert_eq!(clip.duration(), 0.5);
        assert_eq!(AnimationResource::once("hero", 12, 0.0).duration(), 0.0);
    }

    #[test]
    fn directional_set_registers_walk_and_stand() {
        let store = AnimationStore::new().with_directional_set("hero", 8, 12.0);
        assert_eq!(store.animations.len(), 16);
        let walk = store.get("walk.backleft").unwrap();
        assert_eq!(walk.repeat, RepeatMode::Repeat);
        assert_eq!(walk.frame_count, 8);
        assert_eq!(store.get("stand.front").unwrap().frame_count, 1);
    }
}
