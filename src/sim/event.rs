//! Collision event log
//!
//! Every resolved collision appends exactly one timestamped event. The log
//! is append-only and chronological by construction, since events are pushed
//! as the stepping loop resolves them.

use super::arena::Wall;
use super::obstacle::Side;

/// Which collision handler produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Wall,
    Obstacle,
    Merge,
}

/// A timestamped record of a single resolved collision.
#[derive(Debug, Clone)]
pub struct CollisionEvent {
    /// Simulation time of the step that resolved the collision.
    pub time: f64,
    /// Category, fixed where the event is created.
    pub kind: EventKind,
    /// Human-readable description naming the participants.
    pub description: String,
}

impl CollisionEvent {
    /// Particle `particle` bounced off an arena wall.
    pub fn wall(time: f64, particle: usize, wall: Wall) -> Self {
        Self {
            time,
            kind: EventKind::Wall,
            description: format!("Particle {} hits the {} wall", particle, wall.label()),
        }
    }

    /// Particle `particle` bounced off one side of obstacle `obstacle`.
    pub fn obstacle(time: f64, particle: usize, obstacle: usize, side: Side) -> Self {
        Self {
            time,
            kind: EventKind::Obstacle,
            description: format!(
                "Particle {} hits obstacle {} ({} side)",
                particle,
                obstacle,
                side.label()
            ),
        }
    }

    /// Particles `a` and `b` merged into a single new particle.
    pub fn merge(time: f64, a: usize, mass_a: f64, b: usize, mass_b: f64, merged_mass: f64) -> Self {
        Self {
            time,
            kind: EventKind::Merge,
            description: format!(
                "Particle {a} (mass {mass_a:.2}) and particle {b} (mass {mass_b:.2}) merge into a particle of mass {merged_mass:.2}"
            ),
        }
    }
}

/// Per-kind event totals for the report summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCounts {
    pub wall: usize,
    pub obstacle: usize,
    pub merge: usize,
}

impl EventCounts {
    /// Tally a slice of events by kind.
    pub fn tally(events: &[CollisionEvent]) -> Self {
        let mut counts = Self::default();
        for event in events {
            match event.kind {
                EventKind::Wall => counts.wall += 1,
                EventKind::Obstacle => counts.obstacle += 1,
                EventKind::Merge => counts.merge += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.wall + self.obstacle + self.merge
    }
}
