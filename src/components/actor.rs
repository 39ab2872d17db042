//! Actor identity component.
//!
//! Scripts address entities by a stable string id (the same id used in
//! authored action parameters and in save files). [`Actor`] carries that id
//! and the per-actor walking speed used by `goto`.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Default walking speed in pixels per second.
pub const DEFAULT_WALKING_SPEED: f32 = 700.0;

#[derive(Component, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable id used by scripts and save files.
    pub id: String,
    /// Walking speed in pixels per second.
    pub walking_speed: f32,
}

impl Actor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            walking_speed: DEFAULT_WALKING_SPEED,
        }
    }

    pub fn with_walking_speed(mut self, speed: f32) -> Self {
        self.walking_speed = speed;
        self
    }
}

/// Find the entity of the actor with the given id.
pub fn find_actor(world: &mut World, id: &str) -> Option<Entity> {
    let mut query = world.query::<(Entity, &Actor)>();
    query
        .iter(world)
        .find(|(_, actor)| actor.id == id)
        .map(|(entity, _)| entity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_actor_by_id() {
        let mut world = World::new();
        world.spawn(Actor::new("player"));
        let guard = world.spawn(Actor::new("guard").with_walking_speed(120.0)).id();

        assert_eq!(find_actor(&mut world, "guard"), Some(guard));
        assert_eq!(find_actor(&mut world, "nobody"), None);
        assert_eq!(world.get::<Actor>(guard).unwrap().walking_speed, 120.0);
    }
}
