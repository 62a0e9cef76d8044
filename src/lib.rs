//! Collisim - a fixed-step 2D particle collision simulator
//!
//! Core modules:
//! - `sim`: Deterministic simulation (arena, particles, obstacles, stepping loop)
//! - `scenario`: Serde-loadable simulation setups and random spawning
//! - `export`: Plain-text trajectory and collision report writer
//! - `error`: Crate error type
//!
//! Particles fly ballistically inside a rectangular arena, bounce elastically
//! off its walls, bounce with energy loss off axis-aligned rectangular
//! obstacles, and merge into one another on contact. A run is deterministic:
//! fixed timestep, stable particle indices, and randomness only in scenario
//! generation behind an explicit seed.

pub mod error;
pub mod export;
pub mod scenario;
pub mod sim;

pub use error::{Error, Result};
pub use scenario::Scenario;
pub use sim::{
    Arena, CollisionEvent, EventCounts, EventKind, Obstacle, Particle, Side, Simulator, Wall,
};

/// Simulation defaults
pub mod consts {
    /// Default fixed timestep in seconds
    pub const DEFAULT_DT: f64 = 0.01;
    /// Default simulated duration in seconds
    pub const DEFAULT_DURATION: f64 = 20.0;
    /// Restitution coefficient for obstacle contacts (walls stay elastic)
    pub const OBSTACLE_RESTITUTION: f64 = 0.7;
}
