//! Path-following tween.
//!
//! A [`WalkTween`] turns a waypoint path (produced by the scene's
//! [`NavGraph`](crate::resources::navgraph::NavGraph)) and a walking speed into
//! a chain of straight [`SpritePosTween`] segments. Segment `i` lasts
//! `distance(path[i], path[i + 1]) / speed` seconds and only begins once
//! segment `i - 1` is complete.
//!
//! # Segment flow
//!
//! 1. `start` validates the path and speed and precomputes segment durations
//! 2. Every segment snapshots its start from the target's *current* position,
//!    so drift accumulated by a previous segment is absorbed
//! 3. At each segment start the target turns towards the new direction
//!    ([`WalkTarget::start_walk`])
//! 4. After the last segment the target stands and the walk callback is
//!    queued, once
//!
//! Segments are aligned to frames. The frame that ends a segment starts the
//! next one at zero elapsed time; the part of the delta that ran past the
//! segment end is not carried over. With large deltas a walk therefore takes
//! up to one extra frame per segment.
//!
//! A walk has no cancel operation: replacing the actor's
//! [`PosTween`](crate::components::postween::PosTween) drops it and its
//! callback is never queued.

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::components::postween::{PositionTarget, SpritePosTween, SpritePosTweenState};
use crate::components::tween::RepeatMode;
use crate::error::ConfigurationError;
use crate::resources::callbackqueue::{ActionCallback, ActionCallbackQueue, PendingCallback};
use crate::resources::callbackregistry::CallbackRegistry;

/// Waypoint list. Most navigation paths are short.
pub type WalkPath = SmallVec<[Vec2; 8]>;

/// A positional target that can show walking and standing poses.
pub trait WalkTarget: PositionTarget {
    /// A segment from `from` to `to` begins.
    fn start_walk(&mut self, from: Vec2, to: Vec2);
    /// The walk has ended.
    fn stand(&mut self);
}

#[derive(Clone, Debug, Default)]
pub struct WalkTween {
    segment: SpritePosTween,
    path: WalkPath,
    durations: SmallVec<[f32; 8]>,
    speed: f32,
    current_step: usize,
    complete: bool,
    walk_cb: Option<PendingCallback>,
}

fn segment_durations(path: &[Vec2], speed: f32) -> SmallVec<[f32; 8]> {
    path.windows(2)
        .map(|pair| pair[0].distance(pair[1]) / speed)
        .collect()
}

fn validate(path: &[Vec2], speed: f32) -> Result<(), ConfigurationError> {
    if path.is_empty() {
        return Err(ConfigurationError::EmptyPath);
    }
    if !(speed > 0.0) {
        return Err(ConfigurationError::InvalidSpeed(speed));
    }
    Ok(())
}

impl WalkTween {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin walking `path` at `speed` units per second.
    ///
    /// The first segment starts immediately. A single-point path has no
    /// segments and arrives on the first update.
    pub fn start(
        &mut self,
        target: &mut impl WalkTarget,
        path: impl IntoIterator<Item = Vec2>,
        speed: f32,
        cb: Option<ActionCallback>,
    ) -> Result<(), ConfigurationError> {
        let path: WalkPath = path.into_iter().collect();
        validate(&path, speed)?;

        self.durations = segment_durations(&path, speed);
        self.path = path;
        self.speed = speed;
        self.current_step = 0;
        self.complete = false;
        self.walk_cb = cb.map(PendingCallback::Live);

        debug!(
            "walk started: {} waypoints, {:.2}s at speed {}",
            self.path.len(),
            self.total_duration(),
            speed
        );

        if !self.durations.is_empty() {
            self.walk_to_next_step(target);
        }
        Ok(())
    }

    fn walk_to_next_step(&mut self, target: &mut impl WalkTarget) {
        let pf = self.path[self.current_step + 1];
        target.start_walk(target.position(), pf);
        self.segment.start(
            target,
            RepeatMode::NoRepeat,
            1,
            pf,
            self.durations[self.current_step],
            None,
            None,
        );
    }

    fn segment_ended(&mut self, target: &mut impl WalkTarget, queue: &mut ActionCallbackQueue) {
        self.current_step += 1;

        if self.current_step < self.durations.len() {
            self.walk_to_next_step(target);
        } else {
            self.complete = true;
            target.stand();
            if let Some(cb) = &self.walk_cb {
                queue.add(cb.clone());
            }
        }
    }

    /// Advance the current segment, chaining into the next one when it ends.
    pub fn update(
        &mut self,
        target: &mut impl WalkTarget,
        delta: f32,
        queue: &mut ActionCallbackQueue,
    ) {
        if self.complete {
            return;
        }

        if self.durations.is_empty() {
            // single waypoint: already there
            self.current_step = 0;
            self.segment_ended(target, queue);
            return;
        }

        self.segment.update(target, delta, queue);

        if self.segment.is_complete() {
            self.segment_ended(target, queue);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn segment_durations(&self) -> &[f32] {
        &self.durations
    }

    pub fn total_duration(&self) -> f32 {
        self.durations.iter().sum()
    }

    pub fn write(&self, registry: &CallbackRegistry) -> WalkTweenState {
        WalkTweenState {
            segment: self.segment.write(registry),
            path: self.path.to_vec(),
            speed: self.speed,
            current_step: self.current_step,
            complete: self.complete,
            cb: self
                .walk_cb
                .as_ref()
                .and_then(|pending| registry.durable_id(pending)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalkTweenState {
    pub segment: SpritePosTweenState,
    pub path: Vec<Vec2>,
    pub speed: f32,
    pub current_step: usize,
    pub complete: bool,
    pub cb: Option<String>,
}

impl WalkTweenState {
    pub fn read(&self) -> WalkTween {
        let path: WalkPath = self.path.iter().copied().collect();
        let durations = if self.speed > 0.0 {
            segment_durations(&path, self.speed)
        } else {
            SmallVec::new()
        };
        WalkTween {
            segment: self.segment.read(),
            path,
            durations,
            speed: self.speed,
            current_step: self.current_step,
            complete: self.complete,
            walk_cb: self.cb.clone().map(PendingCallback::Durable),
        }
    }
}
