//! Wayfarer engine library.
//!
//! Suspendable scripted actions for point-and-click adventure scenes, built on
//! `bevy_ecs`. Actions run synchronously or park until a tween, timer or
//! transition queues their resume callback; the queue is drained once per
//! tick, after every system has advanced.

pub mod actions;
pub mod actor;
pub mod components;
pub mod error;
pub mod game;
pub mod resources;
pub mod save;
pub mod systems;
