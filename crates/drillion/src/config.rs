//! Game configuration

use drillion_engine::core::config::{ApplicationConfig, CollisionConfig, Config, ConfigError, EngineConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete game configuration: engine settings plus gameplay tuning
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Logging and fixed timestep
    pub engine: EngineConfig,

    /// Broad-phase grid tuning
    pub collision: CollisionConfig,

    /// Gameplay settings
    pub gameplay: GameplayConfig,
}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Seed for the block field
    pub seed: u64,

    /// Block field width in blocks
    pub field_columns: u32,

    /// Block field height in blocks
    pub field_rows: u32,

    /// Edge length of a block
    pub block_size: f32,

    /// Chance that a field slot holds a block
    pub block_density: f64,

    /// Radius of the hexagonal ship hull
    pub ship_radius: f32,

    /// Ship turn rate in radians per second
    pub ship_turn_speed: f32,

    /// Seconds between shots
    pub fire_interval: f32,

    /// Bullet speed in world units per second
    pub bullet_speed: f32,

    /// Bullet lifetime in seconds
    pub bullet_lifetime: f32,

    /// Real seconds to simulate
    pub duration: f32,

    /// Real frame length fed to the fixed timestep
    pub frame_dt: f32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            field_columns: 24,
            field_rows: 8,
            block_size: 1.0,
            block_density: 0.7,
            ship_radius: 1.0,
            ship_turn_speed: 0.4,
            fire_interval: 0.3,
            bullet_speed: 12.0,
            bullet_lifetime: 3.0,
            duration: 30.0,
            frame_dt: 1.0 / 60.0,
        }
    }
}

impl GameplayConfig {
    /// Validate gameplay settings
    pub fn validate(&self) -> Result<(), String> {
        if self.field_columns == 0 || self.field_rows == 0 {
            return Err("Block field must have at least one row and column".to_string());
        }
        if !(0.0..=1.0).contains(&self.block_density) {
            return Err(format!("Block density must be in [0, 1], got {}", self.block_density));
        }
        for (name, value) in [
            ("Block size", self.block_size),
            ("Ship radius", self.ship_radius),
            ("Fire interval", self.fire_interval),
            ("Bullet lifetime", self.bullet_lifetime),
            ("Frame dt", self.frame_dt),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be finite and positive, got {value}"));
            }
        }
        Ok(())
    }
}

impl GameConfig {
    /// Load and validate a `.toml` or `.ron` file, or fall back to defaults
    /// when no path is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        self.application().validate()?;
        self.gameplay.validate()
    }

    /// Engine-side view of the configuration
    pub fn application(&self) -> ApplicationConfig {
        ApplicationConfig {
            engine: self.engine.clone(),
            collision: self.collision.clone(),
        }
    }
}

impl Config for GameConfig {}
