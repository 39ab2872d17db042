//! Generic tween state machine.
//!
//! A [`Tween`] maps elapsed time to a normalized completion value under a
//! [`RepeatMode`] and an optional [`Easing`] curve. It does not know what it
//! animates; the specialized tweens wrap one:
//! - [`SpritePosTween`](crate::components::postween::SpritePosTween) – actor position
//! - [`WalkTween`](crate::components::walktween::WalkTween) – path following
//! - [`SpriteScaleTween`](crate::components::scaletween::SpriteScaleTween) – actor scale
//!
//! Other owners drive a bare tween directly: animation clip playback
//! ([`Animation`](crate::components::animation::Animation)) and the scene
//! [`Transition`](crate::resources::transition::Transition).
//!
//! # Lifecycle
//!
//! 1. Configure with [`Tween::start`] (or the individual setters + [`Tween::restart`])
//! 2. Call [`Tween::update`] once per tick with the frame delta
//! 3. Read [`Tween::percent`] after each update
//! 4. When the tween completes, its callback is pushed onto the
//!    [`ActionCallbackQueue`]; it is never called directly
//!
//! Once complete, `update` does nothing until `restart`.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::resources::callbackqueue::{ActionCallback, ActionCallbackQueue, PendingCallback};
use crate::resources::callbackregistry::CallbackRegistry;

/// Repeat count meaning "repeat forever".
pub const INFINITY: i32 = -1;

/// What a tween does when its elapsed time reaches the duration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    /// Play once and stop.
    #[default]
    NoRepeat,
    /// Restart from the beginning `count` times.
    Repeat,
    /// Bounce between the ends, one leg per count.
    PingPong,
    /// Play once from 100% to 0%.
    Reverse,
    /// Restart from 100% to 0% `count` times.
    ReverseRepeat,
    /// Use whatever the owner considers current (an animation clip's own mode).
    /// Repeats like [`RepeatMode::Repeat`] when driven directly.
    FromCurrent,
}

impl RepeatMode {
    /// Parameter names accepted by actions.
    pub const NAMES: &'static [&'static str] = &[
        "no_repeat",
        "repeat",
        "pingpong",
        "reverse",
        "reverse_repeat",
        "from_current",
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "no_repeat" | "none" => Some(RepeatMode::NoRepeat),
            "repeat" => Some(RepeatMode::Repeat),
            "pingpong" | "yoyo" => Some(RepeatMode::PingPong),
            "reverse" => Some(RepeatMode::Reverse),
            "reverse_repeat" => Some(RepeatMode::ReverseRepeat),
            "from_current" | "from_fa" => Some(RepeatMode::FromCurrent),
            _ => None,
        }
    }

    fn starts_reversed(self) -> bool {
        matches!(self, RepeatMode::Reverse | RepeatMode::ReverseRepeat)
    }
}

/// Easing functions for smooth interpolation.
///
/// These functions transform a linear `t` value (0.0 to 1.0) to create
/// different acceleration/deceleration curves. Curves are stored by name in
/// save files.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed (no easing).
    Linear,
    /// Starts slow, accelerates (quadratic).
    QuadIn,
    /// Starts fast, decelerates (quadratic).
    QuadOut,
    /// Slow start and end (quadratic).
    QuadInOut,
    /// Starts slow, accelerates (cubic).
    CubicIn,
    /// Starts fast, decelerates (cubic).
    CubicOut,
    /// Slow start and end (cubic).
    CubicInOut,
    SineIn,
    SineOut,
    SineInOut,
}

impl Easing {
    pub const NAMES: &'static [&'static str] = &[
        "linear",
        "quad_in",
        "quad_out",
        "quad_in_out",
        "cubic_in",
        "cubic_out",
        "cubic_in_out",
        "sine_in",
        "sine_out",
        "sine_in_out",
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "linear" => Some(Easing::Linear),
            "quad_in" => Some(Easing::QuadIn),
            "quad_out" => Some(Easing::QuadOut),
            "quad_in_out" => Some(Easing::QuadInOut),
            "cubic_in" => Some(Easing::CubicIn),
            "cubic_out" => Some(Easing::CubicOut),
            "cubic_in_out" => Some(Easing::CubicInOut),
            "sine_in" => Some(Easing::SineIn),
            "sine_out" => Some(Easing::SineOut),
            "sine_in_out" => Some(Easing::SineInOut),
            _ => None,
        }
    }

    /// Apply the curve to a normalized time value.
    ///
    /// The input `t` is clamped to [0.0, 1.0].
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => {
                let p = t - 1.0;
                p * p * p + 1.0
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let p = 2.0 * t - 2.0;
                    0.5 * p * p * p + 1.0
                }
            }
            Easing::SineIn => 1.0 - (t * std::f32::consts::FRAC_PI_2).cos(),
            Easing::SineOut => (t * std::f32::consts::FRAC_PI_2).sin(),
            Easing::SineInOut => 0.5 * (1.0 - (t * std::f32::consts::PI).cos()),
        }
    }
}

/// Time-progress state machine shared by every animated property.
#[derive(Clone, Debug, Default)]
pub struct Tween {
    duration: f32,
    time: f32,
    interpolation: Option<Easing>,
    reverse: bool,
    began: bool,
    complete: bool,
    repeat: RepeatMode,
    count: i32,
    /// Count and direction the tween was configured with; `restart` goes back to them.
    initial_count: i32,
    initial_reverse: bool,
    cb: Option<PendingCallback>,
}

impl Tween {
    /// An unconfigured tween. Call [`Tween::start`] before updating.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure and rewind the tween.
    ///
    /// `count` is the number of plays for repeating modes ([`INFINITY`] for
    /// endless). `cb` is queued once when the tween completes.
    pub fn start(
        &mut self,
        duration: f32,
        repeat: RepeatMode,
        count: i32,
        interpolation: Option<Easing>,
        cb: Option<ActionCallback>,
    ) {
        self.duration = duration;
        self.set_repeat_mode(repeat);
        self.set_count(count);
        self.interpolation = interpolation;
        self.cb = cb.map(PendingCallback::Live);
        self.restart();
    }

    /// Advance by `delta` seconds and queue the callback on completion.
    pub fn update(&mut self, delta: f32, queue: &mut ActionCallbackQueue) {
        if self.complete {
            return;
        }

        self.began = true;
        self.time += delta;

        if self.time >= self.duration {
            if matches!(self.repeat, RepeatMode::NoRepeat | RepeatMode::Reverse) || self.count == 1
            {
                self.complete = true;
            } else {
                if self.count > 1 {
                    self.count -= 1;
                }
                self.time = 0.0;

                if self.repeat == RepeatMode::PingPong {
                    self.reverse = !self.reverse;
                }
            }
        }

        if self.complete {
            if let Some(cb) = &self.cb {
                queue.add(cb.clone());
            }
        }
    }

    /// Normalized progress in [0, 1], eased and direction-adjusted.
    pub fn percent(&self) -> f32 {
        let percent = if self.complete || self.duration <= 0.0 {
            1.0
        } else {
            let linear = self.time / self.duration;
            match self.interpolation {
                Some(easing) => easing.apply(linear),
                None => linear,
            }
        };

        if self.reverse { 1.0 - percent } else { percent }
    }

    /// Skip to the end. Completion happens on the next [`Tween::update`].
    pub fn finish(&mut self) {
        self.time = self.duration;
    }

    /// Rewind keeping duration, mode, curve and callback.
    ///
    /// The repeat count and direction go back to their configured values, so
    /// replaying the same deltas gives the same progress.
    pub fn restart(&mut self) {
        self.count = self.initial_count;
        self.reverse = self.initial_reverse;
        self.time = 0.0;
        self.began = false;
        self.complete = false;
    }

    /// Clear the direction flag and the interpolation curve.
    pub fn reset(&mut self) {
        self.reverse = false;
        self.initial_reverse = false;
        self.interpolation = None;
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: f32) {
        self.duration = duration;
    }

    pub fn interpolation(&self) -> Option<Easing> {
        self.interpolation
    }

    pub fn set_interpolation(&mut self, interpolation: Option<Easing>) {
        self.interpolation = interpolation;
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    /// When true, progress goes from 100% to 0%.
    pub fn set_reverse(&mut self, reverse: bool) {
        self.reverse = reverse;
        self.initial_reverse = reverse;
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn has_began(&self) -> bool {
        self.began
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    /// Set the repeat mode. Reverse modes also flip the direction flag on.
    pub fn set_repeat_mode(&mut self, repeat: RepeatMode) {
        self.repeat = repeat;
        if repeat.starts_reversed() {
            self.reverse = true;
        }
        self.initial_reverse = self.reverse;
    }

    pub fn count(&self) -> i32 {
        self.count
    }

    pub fn set_count(&mut self, count: i32) {
        self.count = count;
        self.initial_count = count;
    }

    pub fn set_callback(&mut self, cb: Option<ActionCallback>) {
        self.cb = cb.map(PendingCallback::Live);
    }

    pub fn callback(&self) -> Option<&PendingCallback> {
        self.cb.as_ref()
    }

    /// Persistable form. Live callbacks are stored by their registered id.
    pub fn write(&self, registry: &CallbackRegistry) -> TweenState {
        let cb = self.cb.as_ref().and_then(|pending| {
            let id = registry.durable_id(pending);
            if id.is_none() {
                warn!("tween callback has no durable id; it will not survive the save");
            }
            id
        });

        TweenState {
            duration: self.duration,
            time: self.time,
            reverse: self.reverse,
            began: self.began,
            complete: self.complete,
            repeat: self.repeat,
            count: self.count,
            initial_count: self.initial_count,
            initial_reverse: self.initial_reverse,
            interpolation: self.interpolation,
            cb,
        }
    }
}

/// Serialized [`Tween`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TweenState {
    pub duration: f32,
    pub time: f32,
    pub reverse: bool,
    pub began: bool,
    pub complete: bool,
    pub repeat: RepeatMode,
    pub count: i32,
    pub initial_count: i32,
    pub initial_reverse: bool,
    pub interpolation: Option<Easing>,
    pub cb: Option<String>,
}

impl TweenState {
    /// Rebuild the tween. The callback comes back as a durable id.
    pub fn read(&self) -> Tween {
        Tween {
            duration: self.duration,
            time: self.time,
            interpolation: self.interpolation,
            reverse: self.reverse,
            began: self.began,
            complete: self.complete,
            repeat: self.repeat,
            count: self.count,
            initial_count: self.initial_count,
            initial_reverse: self.initial_reverse,
            cb: self.cb.clone().map(PendingCallback::Durable),
        }
    }
}
