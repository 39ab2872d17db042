use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Uniform sprite scale factor.
#[derive(Component, Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub scale: f32,
}
impl Scale {
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }
}
impl Default for Scale {
    fn default() -> Self {
        Self::new(1.0)
    }
}
