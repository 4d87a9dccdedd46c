//! # Core Engine Module
//!
//! Shared abstractions used throughout the engine.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for the collision engine and the
//!   simulation loop

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig,
    CollisionConfig,
    EngineConfig,
    Config,
    ConfigError,
    ConfigFormat,
};
