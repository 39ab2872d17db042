use bevy_ecs::prelude::*;
use log::error;

use crate::actions::param::{BoundParams, Param, ParamType};
use crate::actions::{Action, resolve_actor};
use crate::actor::start_animation;
use crate::components::tween::RepeatMode;
use crate::resources::callbackqueue::ActionCallback;

const PARAMS: &[Param] = &[
    Param::new("actor", "The target actor. Overrides the actor in 'animation'", ParamType::Actor),
    Param::new("animation", "The animation to set, as 'actor#animation'", ParamType::ActorAnimation)
        .mandatory(),
    Param::new("repeat", "The repeat mode", ParamType::Option)
        .with_default("from_current")
        .with_options(RepeatMode::NAMES),
    Param::new("count", "The times to repeat", ParamType::Integer).with_default("1"),
    Param::new("wait", "If this param is 'false' the action continues inmediatly", ParamType::Boolean)
        .mandatory()
        .with_default("true"),
];

/// Play an animation clip on an actor.
#[derive(Debug)]
pub struct AnimationAction {
    actor: Option<String>,
    animation: String,
    repeat: RepeatMode,
    count: i32,
    wait: bool,
}

impl Default for AnimationAction {
    fn default() -> Self {
        Self {
            actor: None,
            animation: String::new(),
            repeat: RepeatMode::FromCurrent,
            count: 1,
            wait: true,
        }
    }
}

impl Action for AnimationAction {
    fn info(&self) -> &'static str {
        "Sets the animation for an actor"
    }

    fn params(&self) -> &'static [Param] {
        PARAMS
    }

    fn set_params(&mut self, params: &BoundParams) {
        let (owner, animation) = params.get_string2("animation").unwrap_or((None, ""));
        self.actor = params
            .get_string("actor")
            .or_else(|| owner.map(str::to_string))
            .filter(|id| !id.is_empty());
        self.animation = animation.to_string();
        self.repeat = params
            .get_str("repeat")
            .and_then(RepeatMode::from_name)
            .unwrap_or(RepeatMode::FromCurrent);
        self.count = params.get_i32("count").unwrap_or(1);
        self.wait = params.get_bool("wait").unwrap_or(true);
    }

    fn run(&mut self, world: &mut World, cb: ActionCallback) -> bool {
        let Some(actor) = self.actor.as_deref() else {
            error!("animation '{}' has no actor", self.animation);
            return true;
        };
        let Some(entity) = resolve_actor(world, actor) else {
            return true;
        };

        let result = start_animation(
            world,
            entity,
            &self.animation,
            self.repeat,
            self.count,
            self.wait.then_some(cb),
        );

        match result {
            Ok(()) => !self.wait,
            Err(err) => {
                error!("animation '{}': {}", actor, err);
                true
            }
        }
    }
}
