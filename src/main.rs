//! Wayfarer main entry point.
//!
//! Runs a scripted demo scene headless:
//! - **bevy_ecs** holds actors, tweens and the script state
//! - a verb walks the hero, waits, scales it, fades out and leaves the scene
//! - every tick advances the world, then drains the callback queue
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 600 --save demo.json
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use glam::Vec2;
use log::{error, info};

use wayfarer::actions::ActionSpec;
use wayfarer::actions::verb::{Verb, find_verb, run_verb, spawn_verb};
use wayfarer::actor::spawn_actor;
use wayfarer::components::mapposition::MapPosition;
use wayfarer::game::{build_schedule, build_world, tick};
use wayfarer::resources::animationstore::AnimationStore;
use wayfarer::resources::gameconfig::GameConfig;
use wayfarer::resources::worldsignals::WorldSignals;
use wayfarer::save;

/// Wayfarer scripted scene runner
#[derive(Parser)]
#[command(version, about = "Runs a scripted adventure scene headless.")]
struct Cli {
    /// Path of the INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Frame delta in seconds. Defaults to the configured fixed step.
    #[arg(long)]
    dt: Option<f32>,

    /// Write a JSON snapshot of the world here when the run ends.
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,
}

fn demo_verb() -> Verb {
    Verb::new(
        "demo",
        vec![
            ActionSpec::new("goto")
                .with("actor", "hero")
                .with("pos", "400,120"),
            ActionSpec::new("wait").with("time", "0.5"),
            ActionSpec::new("scale")
                .with("actor", "hero")
                .with("scale", "1.5")
                .with("duration", "0.5")
                .with("interpolation", "sine_in_out"),
            ActionSpec::new("transition")
                .with("type", "fadeout")
                .with("time", "1.0"),
            ActionSpec::new("leave").with("scene", "street"),
        ],
    )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!("Hello, world! This is Wayfarer!");
    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        info!("using default config: {}", e);
    }
    let dt = cli.dt.unwrap_or(config.fixed_dt);

    let mut world = build_world(config);
    world.insert_resource(AnimationStore::new().with_directional_set("hero", 8, 12.0));
    let hero = spawn_actor(&mut world, "hero", Vec2::new(100.0, 100.0));
    spawn_verb(&mut world, demo_verb());

    let mut update = build_schedule();
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    run_verb(&mut world, "demo");

    for frame in 0..cli.frames {
        tick(&mut world, &mut update, dt);

        let done = find_verb(&mut world, "demo")
            .and_then(|verb| world.get::<Verb>(verb))
            .is_some_and(|verb| verb.is_pending() && verb.ip + 1 == verb.actions.len());
        if done
            && world
                .resource::<WorldSignals>()
                .current_scene()
                .is_some_and(|scene| scene == "street")
        {
            info!("scene changed after {} frames", frame + 1);
            break;
        }
    }

    if let Some(pos) = world.get::<MapPosition>(hero) {
        info!("hero ended at {},{}", pos.pos.x, pos.pos.y);
    }

    if let Some(path) = cli.save
        && let Err(e) = save::save_to_file(&mut world, &path)
    {
        error!("Failed to save world: {}", e);
    }
}
