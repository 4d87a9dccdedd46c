//! # Drillion Engine
//!
//! A 2D broad-phase collision engine for arcade games.
//!
//! ## Features
//!
//! - **Convex Polygon Bodies**: Point bodies for bullets, hexagons for ships
//! - **Uniform Grid Broad Phase**: Bodies are only re-indexed when they move
//! - **Separating-Edge Narrow Phase**: Exact convex overlap tests
//! - **Category-Pair Dispatch**: Route `(Block, Bullet)` hits to one handler
//! - **Fixed Timestep**: Accumulator for deterministic simulation steps
//!
//! ## Quick Start
//!
//! ```rust
//! use drillion_engine::prelude::*;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
//! enum Kind {
//!     Block,
//!     Bullet,
//! }
//!
//! let dispatcher = CollisionDispatcher::new().with_handler(
//!     Kind::Block,
//!     Kind::Bullet,
//!     |hit: &Collision<Kind>, detector: &mut CollisionDetector<Kind>| {
//!         detector.remove_body(hit.body_b);
//!     },
//! );
//!
//! let mut detector = CollisionDetector::new(&CollisionConfig::default())?.with_listener(dispatcher);
//!
//! let block = Polygon2::rectangle(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0));
//! detector.add_body(
//!     CollisionBody::new(block, Transform2::identity(), UserData::new(Kind::Block, 0)).with_seed(false),
//! );
//! let bullet = detector.add_body(CollisionBody::new(
//!     Polygon2::new(vec![Vec2::zeros()]),
//!     Transform2::from_translation(0.25, 0.0),
//!     UserData::new(Kind::Bullet, 1),
//! ));
//!
//! assert_eq!(detector.update(0.1).len(), 1);
//! assert!(!detector.contains(bullet));
//! # Ok::<(), CollisionError>(())
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod physics;
pub mod spatial;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{ApplicationConfig, CollisionConfig, Config, EngineConfig},
        foundation::{
            collections::BodyKey,
            math::{Transform2, Vec2},
            time::{FixedTimestep, Stopwatch},
        },
        physics::{
            Category, Collision, CollisionBody, CollisionDetector, CollisionDispatcher,
            CollisionError, CollisionHandler, CollisionLayers, CollisionListener, Polygon2,
            UserData,
        },
        spatial::CollisionGrid,
    };
}
