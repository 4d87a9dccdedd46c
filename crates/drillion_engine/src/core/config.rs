//! # Unified Configuration System
//!
//! Configuration for the collision engine and the simulation loop that
//! drives it.
//!
//! ## Configuration Categories
//!
//! - **Collision Config**: Grid tuning for the broad phase
//! - **Engine Config**: Logging and fixed-timestep settings
//! - **Application Config**: Top-level bundle loaded from `.toml` / `.ron`

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError, ConfigFormat};

/// # Collision Configuration
///
/// `cell_size` trades candidate-set size (large cells) against bucket count
/// and per-body footprint size (small cells). A cell roughly the size of the
/// typical body works well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Edge length of a grid cell in world units
    pub cell_size: f32,
    /// Body slots reserved up front
    pub initial_capacity: usize,
}

impl CollisionConfig {
    /// Create a collision configuration with the default cell size
    pub fn new() -> Self {
        Self {
            cell_size: 2.0,
            initial_capacity: 256,
        }
    }

    /// Set the grid cell size
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set the number of body slots reserved up front
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(format!("Cell size must be finite and positive, got {}", self.cell_size));
        }
        Ok(())
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Engine Configuration
///
/// Logging and simulation loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// env_logger filter directives, e.g. `"info"` or `"drillion_engine=debug"`
    pub log_level: String,
    /// Fixed simulation step in seconds
    pub world_dt: f32,
    /// Maximum simulation steps run for one real frame
    pub max_steps_per_frame: u32,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            world_dt: 0.1,
            max_steps_per_frame: 8,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the fixed simulation step
    pub fn with_world_dt(mut self, world_dt: f32) -> Self {
        self.world_dt = world_dt;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.world_dt.is_finite() || self.world_dt <= 0.0 {
            return Err(format!("World dt must be finite and positive, got {}", self.world_dt));
        }
        if self.max_steps_per_frame == 0 {
            return Err("Max steps per frame must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that applications load from disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Collision system configuration
    pub collision: CollisionConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        self.engine.validate()?;
        self.collision.validate()?;
        Ok(())
    }
}

impl Config for ApplicationConfig {}
impl Config for CollisionConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ApplicationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(CollisionConfig::new().with_cell_size(0.0).validate().is_err());
        assert!(CollisionConfig::new().with_cell_size(f32::INFINITY).validate().is_err());
        assert!(EngineConfig::new().with_world_dt(-0.1).validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let text = "[collision]\ncell_size = 4.0\n";
        let config = ApplicationConfig::from_str_with_format(text, ConfigFormat::Toml).unwrap();

        assert_eq!(config.collision.cell_size, 4.0);
        assert_eq!(config.collision.initial_capacity, 256);
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_ron_round_trip() {
        let config = ApplicationConfig {
            engine: EngineConfig::new().with_log_level("debug"),
            collision: CollisionConfig::new().with_cell_size(1.5),
        };
        let text = config.to_string_with_format(ConfigFormat::Ron).unwrap();
        let parsed = ApplicationConfig::from_str_with_format(&text, ConfigFormat::Ron).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let result = ApplicationConfig::load_from_file("settings.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
