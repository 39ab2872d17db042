//! ECS resources made available to systems.
//!
//! Overview
//! - `animationstore` – clip definitions reused across actors
//! - `callbackqueue` – deferred resume callbacks, drained once per tick
//! - `callbackregistry` – durable ids for callbacks that must survive a save
//! - `gameconfig` – settings loaded from `config.ini`
//! - `inventory` – items held by the player
//! - `navgraph` – pathfinder used by walks
//! - `timers` – one-shot timers that resume actions
//! - `transition` – full-screen fade effect
//! - `worldsignals` – current scene and global flags
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod callbackqueue;
pub mod callbackregistry;
pub mod gameconfig;
pub mod inventory;
pub mod navgraph;
pub mod timers;
pub mod transition;
pub mod worldsignals;
pub mod worldtime;
