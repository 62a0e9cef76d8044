//! Axis-aligned rectangular obstacles
//!
//! Obstacles are fixed for the lifetime of a run. Detection is the standard
//! circle-vs-AABB test: clamp the circle center into the rectangle span per
//! axis and compare the remaining distance against the radius. The side a
//! particle responds to is whichever edge line lies closest to its center.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// One side of an obstacle rectangle.
///
/// `Top` is the rectangle's `y`-minimum edge, matching the arena's
/// screen-style coordinates. The variant order is the tie-break priority
/// when several edge lines are equally close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Lowercase name used in collision event descriptions.
    pub fn label(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }

    /// Whether this side's edge line runs horizontally. Bounces off a
    /// horizontal edge flip the vertical velocity component and vice versa.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }
}

/// A fixed axis-aligned rectangle inside the arena.
///
/// `(x, y)` is the top-left corner in arena coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Obstacle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// The point of the rectangle closest to `p`, each coordinate clamped
    /// independently into the rectangle's span. For a center inside the
    /// rectangle this is the center itself.
    pub fn closest_point(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            p.x.clamp(self.left(), self.right()),
            p.y.clamp(self.top(), self.bottom()),
        )
    }

    /// Strict circle-vs-rectangle overlap test.
    ///
    /// Exact for the sampled positions. A fast circle can still cross a
    /// thin rectangle entirely between two fixed steps; such tunneling is
    /// not detected here.
    pub fn overlaps_circle(&self, center: DVec2, radius: f64) -> bool {
        center.distance(self.closest_point(center)) < radius
    }

    /// The side of the rectangle nearest to `center`, by absolute distance
    /// to each of the four edge lines. Ties resolve in the fixed priority
    /// top, right, bottom, left.
    ///
    /// `_prev_center` is the circle's pre-step position, reserved for
    /// approach-direction refinement; the minimum-distance rule alone
    /// decides the result.
    pub fn nearest_side(&self, center: DVec2, _prev_center: DVec2) -> Side {
        let dist_top = (center.y - self.top()).abs();
        let dist_right = (center.x - self.right()).abs();
        let dist_bottom = (center.y - self.bottom()).abs();
        let dist_left = (center.x - self.left()).abs();

        let min = dist_top.min(dist_right).min(dist_bottom).min(dist_left);
        if min == dist_top {
            Side::Top
        } else if min == dist_right {
            Side::Right
        } else if min == dist_bottom {
            Side::Bottom
        } else {
            Side::Left
        }
    }
}
