//! Cross-module collision tests
//!
//! Whole-engine scenarios driving bodies through the detector, grid and
//! dispatcher together.

mod grid_consistency;
mod scenarios;
