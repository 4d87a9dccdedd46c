//! Spatial partitioning data structures
//!
//! Provides the uniform grid used for broad-phase candidate discovery.

pub mod grid;

pub use grid::{Cell, CellRange, CollisionGrid};
