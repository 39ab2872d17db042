//! Game configuration resource.
//!
//! Manages engine settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [actor]
//! walking_speed = 700
//! arrive_distance = 2.0
//!
//! [engine]
//! fixed_dt = 0.016666668
//! time_scale = 1.0
//!
//! [transition]
//! default_time = 1.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::actor::DEFAULT_WALKING_SPEED;

/// Default safe values for startup
const DEFAULT_ARRIVE_DISTANCE: f32 = 2.0;
const DEFAULT_FIXED_DT: f32 = 1.0 / 60.0;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_TRANSITION_TIME: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Walking speed given to actors spawned without an explicit one (px/s).
    pub walking_speed: f32,
    /// `goto` targets closer than this snap instead of walking.
    pub arrive_distance: f32,
    /// Frame delta used by the headless loop, in seconds.
    pub fixed_dt: f32,
    /// Multiplier applied to every frame delta.
    pub time_scale: f32,
    /// Fade duration used when a transition action gives none.
    pub transition_time: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn get_f32(config: &Ini, section: &str, key: &str) -> Option<f32> {
    config.getfloat(section, key).ok().flatten().map(|v| v as f32)
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            walking_speed: DEFAULT_WALKING_SPEED,
            arrive_distance: DEFAULT_ARRIVE_DISTANCE,
            fixed_dt: DEFAULT_FIXED_DT,
            time_scale: DEFAULT_TIME_SCALE,
            transition_time: DEFAULT_TRANSITION_TIME,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: walking_speed={}, arrive_distance={}, fixed_dt={}, time_scale={}, transition_time={}",
            self.walking_speed,
            self.arrive_distance,
            self.fixed_dt,
            self.time_scale,
            self.transition_time
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [actor] section
        if let Some(speed) = get_f32(config, "actor", "walking_speed") {
            self.walking_speed = speed;
        }
        if let Some(distance) = get_f32(config, "actor", "arrive_distance") {
            self.arrive_distance = distance;
        }

        // [engine] section
        if let Some(dt) = get_f32(config, "engine", "fixed_dt") {
            self.fixed_dt = dt;
        }
        if let Some(scale) = get_f32(config, "engine", "time_scale") {
            self.time_scale = scale;
        }

        // [transition] section
        if let Some(time) = get_f32(config, "transition", "default_time") {
            self.transition_time = time;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [actor] section
        config.set("actor", "walking_speed", Some(self.walking_speed.to_string()));
        config.set("actor", "arrive_distance", Some(self.arrive_distance.to_string()));

        // [engine] section
        config.set("engine", "fixed_dt", Some(self.fixed_dt.to_string()));
        config.set("engine", "time_scale", Some(self.time_scale.to_string()));

        // [transition] section
        config.set("transition", "default_time", Some(self.transition_time.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.walking_speed, 700.0);
        assert_eq!(config.arrive_distance, 2.0);
        assert_eq!(config.time_scale, 1.0);
        assert_eq!(config.config_path, PathBuf::from("./config.ini"));
    }

    #[test]
    fn test_partial_ini_keeps_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[actor]\nwalking_speed = 350\n\n[engine]\ntime_scale = 0.5\n")
            .unwrap();
        assert_eq!(config.walking_speed, 350.0);
        assert_eq!(config.time_scale, 0.5);
        assert_eq!(config.arrive_distance, 2.0);
        assert_eq!(config.transition_time, 1.0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = GameConfig::with_path("/nonexistent/wayfarer/config.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.walking_speed, 700.0);
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join(format!(
            "wayfarer_config_test_{}.ini",
            std::process::id()
        ));
        let mut config = GameConfig::with_path(&path);
        config.walking_speed = 123.0;
        config.transition_time = 2.5;
        config.save_to_file().unwrap();

        let mut reloaded = GameConfig::with_path(&path);
        reloaded.load_from_file().unwrap();
        assert_eq!(reloaded.walking_speed, 123.0);
        assert_eq!(reloaded.transition_time, 2.5);
        let _ = std::fs::remove_file(&path);
    }
}
