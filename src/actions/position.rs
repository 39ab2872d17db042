use bevy_ecs::prelude::*;
use glam::Vec2;
use log::error;

use crate::actions::param::{BoundParams, Param, ParamType};
use crate::actions::{Action, resolve_actor};
use crate::actor::start_pos_animation;
use crate::components::mapposition::MapPosition;
use crate::components::tween::{Easing, RepeatMode};
use crate::resources::callbackqueue::ActionCallback;

const PARAMS: &[Param] = &[
    Param::new("actor", "The target actor", ParamType::Actor).mandatory(),
    Param::new("pos", "The target position", ParamType::Vector2).mandatory(),
    Param::new("speed", "Speed in pixels/sec. Overrides 'duration' when set", ParamType::Float),
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

/// Move an actor in a straight line, ignoring the walkable area.
#[derive(Debug)]
pub struct PositionAction {
    actor: String,
    pos: Vec2,
    speed: Option<f32>,
    duration: f32,
    repeat: RepeatMode,
    count: i32,
    interpolation: Option<Easing>,
    wait: bool,
}

impl Default for PositionAction {
    fn default() -> Self {
        Self {
            actor: String::new(),
            pos: Vec2::ZERO,
            speed: None,
            duration: 1.0,
            repeat: RepeatMode::NoRepeat,
            count: 1,
            interpolation: None,
            wait: true,
        }
    }
}

impl Action for PositionAction {
    fn info(&self) -> &'static str {
        "Sets an actor position animation"
    }

    fn params(&self) -> &'static [Param] {
        PARAMS
    }

    fn set_params(&mut self, params: &BoundParams) {
        self.actor = params.get_string("actor").unwrap_or_default();
        self.pos = params.get_vec2("pos").unwrap_or_default();
        self.speed = params.get_f32("speed").filter(|speed| *speed > 0.0);
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

        let duration = match (self.speed, world.get::<MapPosition>(entity)) {
            (Some(speed), Some(from)) => from.pos.distance(self.pos) / speed,
            _ => self.duration,
        };

        let result = start_pos_animation(
            world,
            entity,
            self.repeat,
            self.count,
            duration,
            self.pos,
            self.interpolation,
            self.wait.then_some(cb),
        );

        match result {
            Ok(()) => !self.wait,
            Err(err) => {
                error!("position '{}': {}", self.actor, err);
                true
            }
        }
    }
}
