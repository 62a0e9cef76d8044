//! Fixed-step simulation engine
//!
//! The `Simulator` owns the arena, the particle and obstacle collections,
//! one trajectory per particle slot, and the chronological collision log.
//! Every step runs the same ordered passes: integrate, wall resolution,
//! obstacle resolution, particle-particle resolution (at most one merge),
//! trajectory recording. The first-match-wins orderings inside the passes
//! are deterministic tie-breaks and must not be reordered.

use glam::DVec2;

use super::arena::{Arena, Wall};
use super::event::{CollisionEvent, EventCounts};
use super::obstacle::Obstacle;
use super::particle::Particle;
use crate::consts::OBSTACLE_RESTITUTION;

/// Fixed-step simulation engine for a single run.
///
/// A simulator is set up once (`add_particle` / `add_obstacle`), run once,
/// and afterwards serves as a read-only record of everything that happened.
/// Particle indices are stable across the whole run: merged particles are
/// deactivated in place and new particles are only ever appended.
#[derive(Debug)]
pub struct Simulator {
    arena: Arena,
    dt: f64,
    /// Time of the step currently being resolved, `step_index * dt`.
    time: f64,
    /// Damping applied to the perpendicular velocity component on obstacle
    /// contact. Walls stay perfectly elastic regardless.
    restitution: f64,
    particles: Vec<Particle>,
    obstacles: Vec<Obstacle>,
    /// One recorded position sequence per particle slot, index-aligned
    /// with `particles`.
    trajectories: Vec<Vec<DVec2>>,
    events: Vec<CollisionEvent>,
    /// Particle count captured at `run` entry, before any merge grew the
    /// collection.
    initial_particles: usize,
    finished: bool,
}

impl Simulator {
    pub fn new(width: f64, height: f64, dt: f64) -> Self {
        Self {
            arena: Arena::new(width, height),
            dt,
            time: 0.0,
            restitution: OBSTACLE_RESTITUTION,
            particles: Vec::new(),
            obstacles: Vec::new(),
            trajectories: Vec::new(),
            events: Vec::new(),
            initial_particles: 0,
            finished: false,
        }
    }

    /// Override the obstacle restitution coefficient. Takes effect on the
    /// next `run`; pointless afterwards.
    pub fn set_restitution(&mut self, restitution: f64) {
        self.restitution = restitution;
    }

    /// Add a particle along with its (empty) trajectory slot.
    pub fn add_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
        self.trajectories.push(Vec::new());
    }

    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Run the full fixed-step loop for `floor(duration / dt)` steps.
    ///
    /// One-shot: the simulator moves irrevocably to its finished state and
    /// a second call is ignored with a warning.
    pub fn run(&mut self, duration: f64) {
        if self.finished {
            log::warn!("run() called on a finished simulator, ignoring");
            return;
        }

        let steps = (duration / self.dt) as usize;
        self.initial_particles = self.particles.len();
        log::info!(
            "running {} steps (dt = {}, {} particles, {} obstacles)",
            steps,
            self.dt,
            self.particles.len(),
            self.obstacles.len()
        );

        let progress_every = (steps / 10).max(1);
        for step in 0..steps {
            self.time = step as f64 * self.dt;
            self.step();
            if step % progress_every == 0 {
                log::debug!("progress: {}%", step * 100 / steps);
            }
        }

        self.finished = true;
        log::info!(
            "finished: {} collision events, {} trajectory points, {} active particles",
            self.events.len(),
            self.total_trajectory_points(),
            self.active_particle_count()
        );
    }

    /// One fixed step: integrate, then resolve collisions in the fixed
    /// wall, obstacle, particle order, then record positions.
    fn step(&mut self) {
        self.integrate_particles();
        self.resolve_wall_collisions();
        self.resolve_obstacle_collisions();
        self.resolve_particle_collisions();
        self.record_positions();
    }

    fn integrate_particles(&mut self) {
        for particle in &mut self.particles {
            particle.integrate(self.dt);
        }
    }

    /// Perfectly elastic wall bounces: the normal velocity component flips
    /// sign and the center is clamped back to exactly one radius off the
    /// wall. The tangential component is untouched.
    fn resolve_wall_collisions(&mut self) {
        let (width, height) = (self.arena.width(), self.arena.height());
        for i in 0..self.particles.len() {
            if !self.particles[i].active {
                continue;
            }
            let (pos, radius) = (self.particles[i].pos, self.particles[i].radius);
            let Some(wall) = self.arena.hit_wall(pos, radius) else {
                continue;
            };

            let particle = &mut self.particles[i];
            match wall {
                Wall::Left => {
                    particle.vel.x = -particle.vel.x;
                    particle.pos.x = radius;
                }
                Wall::Right => {
                    particle.vel.x = -particle.vel.x;
                    particle.pos.x = width - radius;
                }
                Wall::Top => {
                    particle.vel.y = -particle.vel.y;
                    particle.pos.y = radius;
                }
                Wall::Bottom => {
                    particle.vel.y = -particle.vel.y;
                    particle.pos.y = height - radius;
                }
            }
            self.events.push(CollisionEvent::wall(self.time, i, wall));
        }
    }

    /// Restitution-damped obstacle bounces: the velocity component
    /// perpendicular to the struck side is negated and scaled, the parallel
    /// component is untouched, and the position is left where it is. Only
    /// the first overlapping obstacle (in added order) acts on a particle
    /// within a step.
    fn resolve_obstacle_collisions(&mut self) {
        for i in 0..self.particles.len() {
            if !self.particles[i].active {
                continue;
            }
            let (pos, vel, radius) = (
                self.particles[i].pos,
                self.particles[i].vel,
                self.particles[i].radius,
            );

            let hit = self
                .obstacles
                .iter()
                .enumerate()
                .find(|(_, obstacle)| obstacle.overlaps_circle(pos, radius));
            let Some((index, obstacle)) = hit else {
                continue;
            };

            // Position before this step's displacement.
            let prev = pos - vel * self.dt;
            let side = obstacle.nearest_side(pos, prev);

            let particle = &mut self.particles[i];
            if side.is_horizontal() {
                particle.vel.y = -particle.vel.y * self.restitution;
            } else {
                particle.vel.x = -particle.vel.x * self.restitution;
            }
            self.events
                .push(CollisionEvent::obstacle(self.time, i, index, side));
        }
    }

    /// Fully inelastic particle-particle resolution: the first overlapping
    /// pair in scan order (i < j) merges into a new particle appended at
    /// the end, and the scan stops. At most one merge happens per step.
    /// The scan bound is the pre-pass length, so the appended particle is
    /// not examined until the next step.
    fn resolve_particle_collisions(&mut self) {
        let count = self.particles.len();
        for i in 0..count {
            if !self.particles[i].active {
                continue;
            }
            for j in (i + 1)..count {
                if !self.particles[i].overlaps(&self.particles[j]) {
                    continue;
                }

                let merged = Particle::merge(&self.particles[i], &self.particles[j]);
                self.events.push(CollisionEvent::merge(
                    self.time,
                    i,
                    self.particles[i].mass,
                    j,
                    self.particles[j].mass,
                    merged.mass,
                ));
                log::debug!(
                    "merge at t = {:.4}: particles {} and {} become particle {}",
                    self.time,
                    i,
                    j,
                    count
                );

                self.particles[i].active = false;
                self.particles[j].active = false;
                self.add_particle(merged);
                return;
            }
        }
    }

    /// Append the current position of every active particle to its
    /// trajectory. A particle deactivated earlier in this step records
    /// nothing, and its trajectory stays frozen from then on; a particle
    /// born from a merge this step records its first sample immediately.
    fn record_positions(&mut self) {
        debug_assert_eq!(self.particles.len(), self.trajectories.len());
        for (particle, trajectory) in self.particles.iter().zip(&mut self.trajectories) {
            if particle.active {
                trajectory.push(particle.pos);
            }
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Time of the last resolved step, `(steps - 1) * dt` after a run.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Recorded positions, one sequence per particle slot, index-aligned
    /// with `particles()`.
    pub fn trajectories(&self) -> &[Vec<DVec2>] {
        &self.trajectories
    }

    /// Particle count at `run` entry, excluding merge products. Before a
    /// run this is simply the current count.
    pub fn initial_particle_count(&self) -> usize {
        if self.finished {
            self.initial_particles
        } else {
            self.particles.len()
        }
    }

    /// Particles still participating in the simulation.
    pub fn active_particle_count(&self) -> usize {
        self.particles.iter().filter(|p| p.active).count()
    }

    pub fn total_trajectory_points(&self) -> usize {
        self.trajectories.iter().map(Vec::len).sum()
    }

    /// Event totals by kind.
    pub fn event_counts(&self) -> EventCounts {
        EventCounts::tally(&self.events)
    }

    /// Write the full plain-text report to `path`. See [`crate::export`].
    pub fn export(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
        crate::export::export_to_file(self, path)
    }
}
