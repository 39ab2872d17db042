//! Full-screen fade effect.
//!
//! The [`Transition`] resource is a coloured overlay whose opacity is driven
//! by a [`Tween`]. `FadeIn` goes from the colour to the scene (alpha 1 → 0),
//! `FadeOut` from the scene to the colour (alpha 0 → 1). A renderer reads
//! [`Transition::alpha`] every frame; the
//! [`transition_system`](crate::systems::transition::transition_system)
//! advances it.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::components::tween::{RepeatMode, Tween, TweenState};
use crate::resources::callbackqueue::{ActionCallback, ActionCallbackQueue};
use crate::resources::callbackregistry::CallbackRegistry;

/// Fade direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionType {
    #[default]
    FadeIn,
    FadeOut,
}

impl TransitionType {
    pub const NAMES: &'static [&'static str] = &["fadein", "fadeout"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "fadein" => Some(TransitionType::FadeIn),
            "fadeout" => Some(TransitionType::FadeOut),
            _ => None,
        }
    }
}

/// RGBA colour with components in [0, 1].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `RRGGBB` or `RRGGBBAA` hex, with or without a leading `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| -> Option<f32> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        let a = if hex.len() == 8 { channel(6)? } else { 1.0 };
        Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

#[derive(Resource, Debug, Default)]
pub struct Transition {
    tween: Tween,
    color: Color,
    kind: TransitionType,
    active: bool,
}

impl Transition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fade lasting `time` seconds. `cb` is queued when it ends.
    pub fn create(
        &mut self,
        time: f32,
        color: Color,
        kind: TransitionType,
        cb: Option<ActionCallback>,
    ) {
        self.color = color;
        self.kind = kind;
        self.active = true;
        self.tween.reset();
        self.tween.start(time, RepeatMode::NoRepeat, 1, None, cb);
    }

    pub fn update(&mut self, delta: f32, queue: &mut ActionCallbackQueue) {
        if self.active {
            self.tween.update(delta, queue);
        }
    }

    /// Overlay opacity for the current frame.
    pub fn alpha(&self) -> f32 {
        if !self.active {
            return 0.0;
        }
        let percent = self.tween.percent();
        let alpha = match self.kind {
            TransitionType::FadeIn => 1.0 - percent,
            TransitionType::FadeOut => percent,
        };
        alpha * self.color.a
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn kind(&self) -> TransitionType {
        self.kind
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_complete(&self) -> bool {
        self.tween.is_complete()
    }

    /// Drop the overlay without queuing its callback.
    pub fn reset(&mut self) {
        self.active = false;
        self.tween = Tween::new();
    }

    pub fn write(&self, registry: &CallbackRegistry) -> Option<TransitionState> {
        self.active.then(|| TransitionState {
            tween: self.tween.write(registry),
            color: self.color,
            kind: self.kind,
        })
    }

    pub fn read(state: Option<&TransitionState>) -> Self {
        match state {
            Some(state) => Transition {
                tween: state.tween.read(),
                color: state.color,
                kind: state.kind,
                active: true,
            },
            None => Transition::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionState {
    pub tween: TweenState,
    pub color: Color,
    pub kind: TransitionType,
}
