//! Circular point-mass particles
//!
//! A particle owns its own kinematics (explicit Euler) plus the pairwise
//! overlap and merge rules. No gravity, no drag: between collisions a
//! particle moves in a straight line, and the only impulses it ever feels
//! come from the collision handlers.

use glam::DVec2;
use serde::{Deserialize, Serialize};

fn active_default() -> bool {
    true
}

/// A circular particle with position, velocity, mass, and radius.
///
/// A particle that merges into another is deactivated rather than removed:
/// inactive particles take no part in integration or collision detection,
/// but keep their slot so particle indices stay stable for the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    /// Center position.
    pub pos: DVec2,
    /// Velocity in units per second.
    pub vel: DVec2,
    /// Mass, strictly positive.
    pub mass: f64,
    /// Radius, strictly positive.
    pub radius: f64,
    /// Cleared once the particle merges into another; never set back.
    #[serde(default = "active_default")]
    pub active: bool,
}

impl Particle {
    pub fn new(pos: DVec2, vel: DVec2, mass: f64, radius: f64) -> Self {
        Self {
            pos,
            vel,
            mass,
            radius,
            active: true,
        }
    }

    /// Linear momentum `mass * vel`.
    #[inline]
    pub fn momentum(&self) -> DVec2 {
        self.mass * self.vel
    }

    /// Advance the position by one explicit Euler step. No-op when inactive.
    pub fn integrate(&mut self, dt: f64) {
        if !self.active {
            return;
        }
        self.pos += self.vel * dt;
    }

    /// Strict circle-circle overlap test. Exactly touching circles do not
    /// overlap, and inactive particles never overlap anything.
    pub fn overlaps(&self, other: &Particle) -> bool {
        if !self.active || !other.active {
            return false;
        }
        self.pos.distance(other.pos) < self.radius + other.radius
    }

    /// Combine two particles into one, fully inelastically.
    ///
    /// The merged particle conserves mass and linear momentum, sits at the
    /// mass-weighted centroid, and keeps the combined disc area
    /// (`r'^2 = r_a^2 + r_b^2`; the pi factor cancels). Neither input is
    /// mutated; deactivating them is the caller's job.
    pub fn merge(a: &Particle, b: &Particle) -> Particle {
        let mass = a.mass + b.mass;
        let vel = (a.momentum() + b.momentum()) / mass;
        let pos = (a.mass * a.pos + b.mass * b.pos) / mass;
        let radius = (a.radius * a.radius + b.radius * b.radius).sqrt();
        Particle::new(pos, vel, mass, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_integrate_moves_active_particle() {
        let mut p = Particle::new(DVec2::new(10.0, 20.0), DVec2::new(50.0, -30.0), 1.0, 5.0);
        p.integrate(0.1);
        assert_eq!(p.pos, DVec2::new(15.0, 17.0));
    }

    #[test]
    fn test_integrate_is_a_noop_when_inactive() {
        let mut p = Particle::new(DVec2::new(10.0, 20.0), DVec2::new(50.0, -30.0), 1.0, 5.0);
        p.active = false;
        p.integrate(0.1);
        assert_eq!(p.pos, DVec2::new(10.0, 20.0));
    }

    #[test]
    fn test_overlap_is_strict() {
        // Exactly touching (distance == r_a + r_b) is not an overlap.
        let a = Particle::new(DVec2::ZERO, DVec2::ZERO, 1.0, 5.0);
        let touching = Particle::new(DVec2::new(10.0, 0.0), DVec2::ZERO, 1.0, 5.0);
        let inside = Particle::new(DVec2::new(9.9, 0.0), DVec2::ZERO, 1.0, 5.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
    }

    #[test]
    fn test_inactive_particles_never_overlap() {
        let a = Particle::new(DVec2::ZERO, DVec2::ZERO, 1.0, 5.0);
        let mut b = Particle::new(DVec2::new(1.0, 0.0), DVec2::ZERO, 1.0, 5.0);
        assert!(a.overlaps(&b));
        b.active = false;
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_merge_combines_mass_momentum_and_area() {
        let a = Particle::new(DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0), 1.0, 3.0);
        let b = Particle::new(DVec2::new(2.0, 0.0), DVec2::new(-2.0, 0.0), 3.0, 4.0);
        let m = Particle::merge(&a, &b);

        assert_eq!(m.mass, 4.0);
        // Momentum 1*4 + 3*(-2) = -2, so v = -0.5.
        assert!((m.vel.x - (-0.5)).abs() < 1e-12);
        assert_eq!(m.vel.y, 0.0);
        // Mass-weighted centroid (0*1 + 2*3) / 4 = 1.5.
        assert!((m.pos.x - 1.5).abs() < 1e-12);
        // Combined area: sqrt(9 + 16) = 5.
        assert!((m.radius - 5.0).abs() < 1e-12);
        assert!(m.active);
    }

    #[test]
    fn test_merge_leaves_inputs_untouched() {
        let a = Particle::new(DVec2::ZERO, DVec2::new(1.0, 0.0), 1.0, 2.0);
        let b = Particle::new(DVec2::new(1.0, 0.0), DVec2::new(-1.0, 0.0), 2.0, 3.0);
        let _ = Particle::merge(&a, &b);
        assert!(a.active && b.active);
        assert_eq!(a.mass, 1.0);
        assert_eq!(b.mass, 2.0);
    }

    proptest! {
        #[test]
        fn test_merge_conserves_momentum(
            ma in 0.1f64..50.0,
            mb in 0.1f64..50.0,
            vax in -100.0f64..100.0,
            vay in -100.0f64..100.0,
            vbx in -100.0f64..100.0,
            vby in -100.0f64..100.0,
        ) {
            let a = Particle::new(DVec2::ZERO, DVec2::new(vax, vay), ma, 1.0);
            let b = Particle::new(DVec2::new(1.0, 1.0), DVec2::new(vbx, vby), mb, 2.0);
            let m = Particle::merge(&a, &b);
            let before = a.momentum() + b.momentum();
            prop_assert!((before - m.momentum()).length() < 1e-9);
        }

        #[test]
        fn test_merge_preserves_combined_area(ra in 0.1f64..30.0, rb in 0.1f64..30.0) {
            let a = Particle::new(DVec2::ZERO, DVec2::ZERO, 1.0, ra);
            let b = Particle::new(DVec2::new(5.0, 0.0), DVec2::ZERO, 1.0, rb);
            let m = Particle::merge(&a, &b);
            prop_assert!((m.radius * m.radius - (ra * ra + rb * rb)).abs() < 1e-9);
        }

        #[test]
        fn test_merged_centroid_lies_between_inputs(
            ax in -100.0f64..100.0,
            bx in -100.0f64..100.0,
            ma in 0.1f64..50.0,
            mb in 0.1f64..50.0,
        ) {
            let a = Particle::new(DVec2::new(ax, 0.0), DVec2::ZERO, ma, 1.0);
            let b = Particle::new(DVec2::new(bx, 0.0), DVec2::ZERO, mb, 1.0);
            let m = Particle::merge(&a, &b);
            let (lo, hi) = if ax <= bx { (ax, bx) } else { (bx, ax) };
            prop_assert!(m.pos.x >= lo - 1e-9 && m.pos.x <= hi + 1e-9);
        }
    }
}
