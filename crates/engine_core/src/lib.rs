//! Core engine types and utilities for the space trader simulation.
//!
//! This crate provides the foundational types used across all simulation systems:
//! - 2D transform and heading math
//! - Fixed-timestep time management
//! - Common components (durability, lifetime, cooldowns)
//! - The seeded Mulberry32 generator used for reproducible content

pub mod components;
pub mod rng;
pub mod time;
pub mod transform;

pub use components::*;
pub use rng::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::Vec2;
