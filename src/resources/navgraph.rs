//! Pathfinder seam.
//!
//! Building a navigation mesh is the scene loader's business. The engine only
//! needs "start, end → waypoints", expressed by the [`PathFinder`] trait and
//! held in the [`NavGraph`] resource. A scene without a graph lets actors walk
//! in a straight line.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

use crate::components::walktween::WalkPath;

/// Computes walkable paths between two points.
pub trait PathFinder: Send + Sync {
    /// Waypoints from `from` to `to`, both included. `None` or an empty path
    /// when `to` cannot be reached.
    fn find_path(&self, from: Vec2, to: Vec2) -> Option<WalkPath>;
}

/// Walk straight to the target.
#[derive(Debug, Default, Clone, Copy)]
pub struct StraightLine;

impl PathFinder for StraightLine {
    fn find_path(&self, from: Vec2, to: Vec2) -> Option<WalkPath> {
        Some(WalkPath::from_slice(&[from, to]))
    }
}

/// Axis-aligned rectangle nothing can walk out of. Targets outside are
/// unreachable.
#[derive(Debug, Clone, Copy)]
pub struct WalkableRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl PathFinder for WalkableRect {
    fn find_path(&self, from: Vec2, to: Vec2) -> Option<WalkPath> {
        let inside = |p: Vec2| p.cmpge(self.min).all() && p.cmple(self.max).all();
        if !inside(to) {
            return None;
        }
        Some(WalkPath::from_slice(&[from, to]))
    }
}

#[derive(Resource)]
pub struct NavGraph {
    finder: Box<dyn PathFinder>,
}

impl Default for NavGraph {
    fn default() -> Self {
        Self::new(StraightLine)
    }
}

impl NavGraph {
    pub fn new(finder: impl PathFinder + 'static) -> Self {
        Self {
            finder: Box::new(finder),
        }
    }

    pub fn find_path(&self, from: Vec2, to: Vec2) -> Option<WalkPath> {
        self.finder.find_path(from, to)
    }
}
