//! Global script state resource.
//!
//! [`WorldSignals`] holds what scripts publish for the host to read. The
//! `leave` action writes the scene the player is heading to; the host polls
//! [`WorldSignals::current_scene`] and loads it.

use bevy_ecs::prelude::Resource;
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Resource, Serialize, Deserialize)]
pub struct WorldSignals {
    /// Scene requested by the last `leave`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scene: Option<String>,
}

impl WorldSignals {
    pub fn current_scene(&self) -> Option<&str> {
        self.scene.as_deref()
    }

    pub fn set_current_scene(&mut self, scene: impl Into<String>) {
        let scene = scene.into();
        info!("entering scene '{}'", scene);
        self.scene = Some(scene);
    }
}
