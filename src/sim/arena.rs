//! Rectangular arena bounds and wall classification
//!
//! The arena is a fixed axis-aligned rectangle with its origin in the
//! top-left corner: `Top` is the `y = 0` edge and `Bottom` the `y = height`
//! edge, screen-style. All particle centers live in `[0, width] x [0, height]`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// One of the arena's four walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

impl Wall {
    /// Lowercase name used in collision event descriptions.
    pub fn label(self) -> &'static str {
        match self {
            Wall::Left => "left",
            Wall::Right => "right",
            Wall::Top => "top",
            Wall::Bottom => "bottom",
        }
    }
}

/// The fixed rectangular bounds containing all particles.
///
/// Immutable after construction; both dimensions are expected to be
/// strictly positive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Arena {
    width: f64,
    height: f64,
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Classify a circle against the four walls.
    ///
    /// Walls are tested left, right, top, bottom, and the first match wins,
    /// so a circle reaching into a corner is reported against the earlier
    /// wall in that order. The fixed order is the corner tie-break; callers
    /// must not reorder it. Touching counts: `x - r <= 0` is already a hit.
    pub fn hit_wall(&self, pos: DVec2, radius: f64) -> Option<Wall> {
        if pos.x - radius <= 0.0 {
            Some(Wall::Left)
        } else if pos.x + radius >= self.width {
            Some(Wall::Right)
        } else if pos.y - radius <= 0.0 {
            Some(Wall::Top)
        } else if pos.y + radius >= self.height {
            Some(Wall::Bottom)
        } else {
            None
        }
    }
}
