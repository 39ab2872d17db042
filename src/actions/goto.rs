use bevy_ecs::prelude::*;
use glam::Vec2;
use log::error;

use crate::actions::param::{BoundParams, Param, ParamType};
use crate::actions::{Action, resolve_actor};
use crate::actor::go_to;
use crate::resources::callbackqueue::ActionCallback;

const PARAMS: &[Param] = &[
    Param::new("actor", "The target actor", ParamType::Actor).mandatory(),
    Param::new("pos", "The position to walk to", ParamType::Vector2).mandatory(),
    Param::new("wait", "If this param is 'false' the text is showed and the action continues inmediatly", ParamType::Boolean)
        .mandatory()
        .with_default("true"),
];

/// Walk an actor to a point along the scene's walkable area.
#[derive(Debug)]
pub struct GotoAction {
    actor: String,
    pos: Vec2,
    wait: bool,
}

impl Default for GotoAction {
    fn default() -> Self {
        Self {
            actor: String::new(),
            pos: Vec2::ZERO,
            wait: true,
        }
    }
}

impl Action for GotoAction {
    fn info(&self) -> &'static str {
        "Walks to the selected position"
    }

    fn params(&self) -> &'static [Param] {
        PARAMS
    }

    fn set_params(&mut self, params: &BoundParams) {
        self.actor = params.get_string("actor").unwrap_or_default();
        self.pos = params.get_vec2("pos").unwrap_or_default();
        self.wait = params.get_bool("wait").unwrap_or(true);
    }

    fn run(&mut self, world: &mut World, cb: ActionCallback) -> bool {
        let Some(entity) = resolve_actor(world, &self.actor) else {
            return true;
        };

        match go_to(world, entity, self.pos, self.wait.then_some(cb)) {
            Ok(()) => !self.wait,
            Err(err) => {
                error!("goto '{}': {}", self.actor, err);
                true
            }
        }
    }
}
