//! Engine systems.
//!
//! Submodules overview
//! - [`animation`] – advance actor animation clips
//! - [`callbacks`] – drain the callback queue after the update schedule
//! - [`time`] – update simulation time and delta, process timers
//! - [`transition`] – advance the screen fade
//! - [`tween`] – animate actor position and scale

pub mod animation;
pub mod callbacks;
pub mod time;
pub mod transition;
pub mod tween;
