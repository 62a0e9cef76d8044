//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable particle indices (deactivate in place, append only)
//! - Fixed first-match-wins orderings in every collision pass
//! - No I/O; reporting and configuration live outside

pub mod arena;
pub mod engine;
pub mod event;
pub mod obstacle;
pub mod particle;

pub use arena::{Arena, Wall};
pub use engine::Simulator;
pub use event::{CollisionEvent, EventCounts, EventKind};
pub use obstacle::{Obstacle, Side};
pub use particle::Particle;
