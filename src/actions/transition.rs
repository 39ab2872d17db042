use bevy_ecs::prelude::*;
use log::warn;

use crate::actions::Action;
use crate::actions::param::{BoundParams, Param, ParamType};
use crate::resources::callbackqueue::ActionCallback;
use crate::resources::gameconfig::GameConfig;
use crate::resources::transition::{Color, Transition, TransitionType};

const PARAMS: &[Param] = &[
    Param::new("time", "Duration of the transition. Defaults to the configured time", ParamType::Float),
    Param::new("color", "'black', 'white' or an RRGGBB(AA) hex value", ParamType::String)
        .mandatory()
        .with_default("black"),
    Param::new("type", "The transition type (fadein/fadeout)", ParamType::Option)
        .mandatory()
        .with_default("fadein")
        .with_options(TransitionType::NAMES),
    Param::new("wait", "Wait for the transition to finish", ParamType::Boolean)
        .mandatory()
        .with_default("true"),
];

fn parse_color(value: &str) -> Option<Color> {
    match value.trim().to_ascii_lowercase().as_str() {
        "black" => Some(Color::BLACK),
        "white" => Some(Color::WHITE),
        hex => Color::from_hex(hex),
    }
}

/// Fade the screen from or to a colour.
#[derive(Debug)]
pub struct TransitionAction {
    time: Option<f32>,
    color: Color,
    kind: TransitionType,
    wait: bool,
}

impl Default for TransitionAction {
    fn default() -> Self {
        Self {
            time: None,
            color: Color::BLACK,
            kind: TransitionType::FadeIn,
            wait: true,
        }
    }
}

impl Action for TransitionAction {
    fn info(&self) -> &'static str {
        "Sets a transition effect (FADEIN/FADEOUT)"
    }

    fn params(&self) -> &'static [Param] {
        PARAMS
    }

    fn set_params(&mut self, params: &BoundParams) {
        self.time = params.get_f32("time");
        self.color = match params.get_str("color") {
            Some(value) => parse_color(value).unwrap_or_else(|| {
                warn!("transition: unknown colour '{}', using black", value);
                Color::BLACK
            }),
            None => Color::BLACK,
        };
        self.kind = params
            .get_str("type")
            .and_then(TransitionType::from_name)
            .unwrap_or_default();
        self.wait = params.get_bool("wait").unwrap_or(true);
    }

    fn run(&mut self, world: &mut World, cb: ActionCallback) -> bool {
        let time = self.time.unwrap_or_else(|| {
            world
                .get_resource::<GameConfig>()
                .map_or(1.0, |config| config.transition_time)
        });
        let cb = self.wait.then_some(cb);
        world
            .get_resource_or_init::<Transition>()
            .create(time, self.color, self.kind, cb);
        !self.wait
    }
}
