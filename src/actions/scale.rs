use bevy_ecs::prelude::*;
use log::error;

use crate::actions::param::{BoundParams, Param, ParamType};
use crate::actions::{Action, resolve_actor};
use crate::actor::start_scale_animation;
use crate::components::tween::{Easing, RepeatMode};
use crate::resources::callbackqueue::ActionCallback;

const PARAMS: &[Param] = &[
    Param::new("actor", "The target actor", ParamType::Actor).mandatory(),
    Param::new("scale", "The target scale", ParamType::Float).mandatory(),
    Param::new("duration", "Duration of the animation in seconds", ParamType::Float)
        .with_default("1.0"),
    Param::new("repeat", "The repeat mode", ParamType::Option)
        .with_default("no_repeat")
        .with_options(RepeatMode::NAMES),
    Param::new("count", "The times to repeat", ParamType::Integer).with_default("1"),
    Param::new("interpolation", "The interpolation mode", ParamType::Option)
        .with_options(Easing::NAMES),
    Param::new("wait", "If this param is 'false' the action continues inmediatly", ParamType::Boolean)
        .mandatory()
        .with_default("true"),
];

/// Animate an actor's uniform scale.
#[derive(Debug)]
pub struct ScaleAction {
    actor: String,
    scale: f32,
    duration: f32,
    repeat: RepeatMode,
    count: i32,
    interpolation: Option<Easing>,
    wait: bool,
}

impl Default for ScaleAction {
    fn default() -> Self {
        Self {
            actor: String::new(),
            scale: 1.0,
            duration: 1.0,
            repeat: RepeatMode::NoRepeat,
            count: 1,
            interpolation: None,
            wait: true,
        }
    }
}

impl Action for ScaleAction {
    fn info(&self) -> &'static str {
        "Sets an actor scale animation"
    }

    fn params(&self) -> &'static [Param] {
        PARAMS
    }

    fn set_params(&mut self, params: &BoundParams) {
        self.actor = params.get_string("actor").unwrap_or_default();
        self.scale = params.get_f32("scale").unwrap_or(1.0);
        self.duration = params.get_f32("duration").unwrap_or(1.0);
        self.repeat = params
            .get_str("repeat")
            .and_then(RepeatMode::from_name)
            .unwrap_or_default();
        self.count = params.get_i32("count").unwrap_or(1);
        self.interpolation = params.get_str("interpolation").and_then(Easing::from_name);
        self.wait = params.get_bool("wait").unwrap_or(true);
    }

    fn run(&mut self, world: &mut World, cb: ActionCallback) -> bool {
        let Some(entity) = resolve_actor(world, &self.actor) else {
            return true;
        };

        let result = start_scale_animation(
            world,
            entity,
            self.repeat,
            self.count,
            self.duration,
            self.scale,
            self.interpolation,
            self.wait.then_some(cb),
        );

        match result {
            Ok(()) => !self.wait,
            Err(err) => {
                error!("scale '{}': {}", self.actor, err);
                true
            }
        }
    }
}
