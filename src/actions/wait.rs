use bevy_ecs::prelude::*;

use crate::actions::Action;
use crate::actions::param::{BoundParams, Param, ParamType};
use crate::resources::callbackqueue::ActionCallback;
use crate::resources::timers::Timers;

const PARAMS: &[Param] = &[
    Param::new("time", "The time pause in seconds", ParamType::Float)
        .mandatory()
        .with_default("1.0"),
];

/// Suspend the verb for `time` seconds.
#[derive(Debug, Default)]
pub struct WaitAction {
    time: f32,
}

impl Action for WaitAction {
    fn info(&self) -> &'static str {
        "Pause the action"
    }

    fn params(&self) -> &'static [Param] {
        PARAMS
    }

    fn set_params(&mut self, params: &BoundParams) {
        self.time = params.get_f32("time").unwrap_or(1.0);
    }

    fn run(&mut self, world: &mut World, cb: ActionCallback) -> bool {
        world.get_resource_or_init::<Timers>().add_timer(self.time, cb);
        false
    }
}
