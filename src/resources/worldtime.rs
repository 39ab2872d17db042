use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Simulation clock. `delta` is the scaled delta of the current tick.
#[derive(Resource, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
