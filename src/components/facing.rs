//! Facing direction of an actor.
//!
//! Walking updates the facing at the start of every path segment and the
//! animation key is derived from it (`walk.left`, `stand.frontright`, ...).
//! World coordinates grow upwards, so moving towards +y shows the actor's back.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Eight-way facing used to pick directional animations.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Front,
    FrontRight,
    Right,
    BackRight,
    Back,
    BackLeft,
    Left,
    FrontLeft,
}

impl Direction {
    /// Direction of travel along `v`, or `None` for a zero vector.
    pub fn from_vector(v: Vec2) -> Option<Direction> {
        if v.length_squared() <= f32::EPSILON {
            return None;
        }
        let degrees = v.y.atan2(v.x).to_degrees();
        // 0° is right, counter-clockwise; each sector spans 45° centred on its axis
        let sector = (((degrees + 22.5).rem_euclid(360.0)) / 45.0) as usize % 8;
        Some(match sector {
            0 => Direction::Right,
            1 => Direction::BackRight,
            2 => Direction::Back,
            3 => Direction::BackLeft,
            4 => Direction::Left,
            5 => Direction::FrontLeft,
            6 => Direction::Front,
            _ => Direction::FrontRight,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Front => "front",
            Direction::FrontRight => "frontright",
            Direction::Right => "right",
            Direction::BackRight => "backright",
            Direction::Back => "back",
            Direction::BackLeft => "backleft",
            Direction::Left => "left",
            Direction::FrontLeft => "frontleft",
        }
    }
}

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Facing {
    pub direction: Direction,
}

impl Facing {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }

    /// Turn towards `v`; a zero vector keeps the current facing.
    pub fn look_along(&mut self, v: Vec2) {
        if let Some(direction) = Direction::from_vector(v) {
            self.direction = direction;
        }
    }
}
