use bevy_ecs::prelude::*;

use crate::actions::Action;
use crate::actions::param::{BoundParams, Param, ParamType};
use crate::resources::callbackqueue::{ActionCallback, ActionCallbackQueue};
use crate::resources::worldsignals::WorldSignals;

const PARAMS: &[Param] = &[Param::new("scene", "The target scene", ParamType::Scene).mandatory()];

/// Change the current scene.
///
/// The change itself is queued so it happens after the current update pass.
/// The verb's own callback is never queued: leaving a scene ends the verb.
#[derive(Debug, Default)]
pub struct LeaveAction {
    scene: String,
}

impl Action for LeaveAction {
    fn info(&self) -> &'static str {
        "Change the current scene."
    }

    fn params(&self) -> &'static [Param] {
        PARAMS
    }

    fn set_params(&mut self, params: &BoundParams) {
        self.scene = params.get_string("scene").unwrap_or_default();
    }

    fn run(&mut self, world: &mut World, _cb: ActionCallback) -> bool {
        let scene = self.scene.clone();
        let change = ActionCallback::new(move |world: &mut World| {
            world
                .get_resource_or_init::<WorldSignals>()
                .set_current_scene(scene.clone());
        });
        world.get_resource_or_init::<ActionCallbackQueue>().add(change);
        false
    }
}
