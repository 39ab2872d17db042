//! ECS components for actors.
//!
//! Components hold per-actor data; the tween state machines they wrap are
//! plain structs usable without an ECS.
//!
//! Submodules overview:
//! - [`actor`] – stable id and walking speed of a scripted character
//! - [`animation`] – current clip and its playback tween
//! - [`facing`] – 8-way direction used to pick walk/stand clips
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`postween`] – the positional tween slot (straight move or walk)
//! - [`scale`] – uniform scale factor
//! - [`scaletween`] – the scale tween slot
//! - [`tween`] – the time/duration/repeat/interpolation state machine
//! - [`walktween`] – a walk along a path at constant speed

pub mod actor;
pub mod animation;
pub mod facing;
pub mod mapposition;
pub mod postween;
pub mod scale;
pub mod scaletween;
pub mod tween;
pub mod walktween;
