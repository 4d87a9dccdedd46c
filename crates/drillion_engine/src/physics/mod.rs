//! Physics module for 2D collision detection
//!
//! Convex polygon bodies are indexed in a uniform grid (broad phase) and
//! tested with the separating-edge test (narrow phase). Only bodies that moved
//! since the previous update are examined.

pub mod body;
pub mod collision;
pub mod collision_layers;
pub mod detector;
pub mod dispatcher;
pub mod error;

#[cfg(test)]
mod tests;

pub use body::{Category, CollisionBody, UserData};
pub use collision::{Aabb2, Polygon2};
pub use collision_layers::CollisionLayers;
pub use detector::{Collision, CollisionDetector, UpdateStats};
pub use dispatcher::{CollisionDispatcher, CollisionHandler, CollisionListener};
pub use error::CollisionError;
