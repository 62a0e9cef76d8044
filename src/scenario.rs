//! Scenario configuration
//!
//! A scenario is everything needed to set up a run: arena, step size,
//! duration, obstacle and particle lists, plus an optional seed for the
//! random spawner. Scenarios are plain serde structs loadable from JSON;
//! the built-in demo reproduces the reference setup of four particles
//! launched among four square obstacles.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DT, DEFAULT_DURATION, OBSTACLE_RESTITUTION};
use crate::error::{Error, Result};
use crate::sim::{Arena, Obstacle, Particle, Simulator};

/// Bounds for randomly spawned particles.
const SPAWN_RADIUS_MIN: f64 = 5.0;
const SPAWN_RADIUS_MAX: f64 = 12.0;
const SPAWN_MASS_MIN: f64 = 0.5;
const SPAWN_MASS_MAX: f64 = 2.0;
const SPAWN_MAX_SPEED: f64 = 60.0;
/// Placement attempts per spawned particle before giving up.
const SPAWN_MAX_ATTEMPTS: usize = 10_000;

fn default_dt() -> f64 {
    DEFAULT_DT
}

fn default_duration() -> f64 {
    DEFAULT_DURATION
}

fn default_restitution() -> f64 {
    OBSTACLE_RESTITUTION
}

/// A complete simulation setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub arena: Arena,
    /// Fixed step size in seconds.
    #[serde(default = "default_dt")]
    pub dt: f64,
    /// Simulated duration in seconds.
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Seed for the random spawner; `None` means a fixed default, so every
    /// run stays reproducible.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Restitution coefficient for obstacle contacts.
    #[serde(default = "default_restitution")]
    pub restitution: f64,
    #[serde(default)]
    pub particles: Vec<Particle>,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

impl Scenario {
    /// Load a scenario from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let scenario = serde_json::from_reader(reader)?;
        Ok(scenario)
    }

    /// The built-in demo: an 800 x 600 arena with four square obstacles and
    /// four particles launched toward the middle.
    pub fn demo() -> Self {
        Self {
            arena: Arena::new(800.0, 600.0),
            dt: DEFAULT_DT,
            duration: DEFAULT_DURATION,
            seed: None,
            restitution: OBSTACLE_RESTITUTION,
            particles: vec![
                Particle::new(DVec2::new(100.0, 100.0), DVec2::new(50.0, 30.0), 1.0, 10.0),
                Particle::new(DVec2::new(700.0, 100.0), DVec2::new(-40.0, 40.0), 1.5, 12.0),
                Particle::new(DVec2::new(100.0, 500.0), DVec2::new(60.0, -35.0), 0.8, 8.0),
                Particle::new(
                    DVec2::new(700.0, 500.0),
                    DVec2::new(-45.0, -25.0),
                    1.2,
                    11.0,
                ),
            ],
            obstacles: vec![
                Obstacle::new(200.0, 150.0, 50.0, 50.0),
                Obstacle::new(550.0, 150.0, 50.0, 50.0),
                Obstacle::new(200.0, 400.0, 50.0, 50.0),
                Obstacle::new(550.0, 400.0, 50.0, 50.0),
            ],
        }
    }

    /// Build a ready-to-run simulator from this scenario.
    pub fn build(&self) -> Simulator {
        let mut sim = Simulator::new(self.arena.width(), self.arena.height(), self.dt);
        sim.set_restitution(self.restitution);
        for obstacle in &self.obstacles {
            sim.add_obstacle(*obstacle);
        }
        for particle in &self.particles {
            sim.add_particle(particle.clone());
        }
        sim
    }

    /// Add `count` randomly placed particles to the scenario.
    ///
    /// Positions are rejection-sampled so every spawned particle starts
    /// fully inside the arena and clear of obstacles and existing
    /// particles. Velocities, masses, and radii are drawn uniformly from
    /// fixed bounds. The RNG is seeded from `self.seed`, so a given
    /// scenario always spawns the same particles.
    pub fn spawn_random_particles(&mut self, count: usize) -> Result<()> {
        if self.arena.width() <= 2.0 * SPAWN_RADIUS_MAX || self.arena.height() <= 2.0 * SPAWN_RADIUS_MAX
        {
            return Err(Error::InvalidScenario(
                "arena too small for random spawning".to_string(),
            ));
        }

        let seed = self.seed.unwrap_or(0);
        let mut rng = Pcg32::seed_from_u64(seed);
        for n in 0..count {
            let radius = rng.random_range(SPAWN_RADIUS_MIN..SPAWN_RADIUS_MAX);
            let pos = self.place(radius, &mut rng).ok_or_else(|| {
                Error::InvalidScenario(format!(
                    "no free space for spawned particle {} of {} after {} attempts",
                    n + 1,
                    count,
                    SPAWN_MAX_ATTEMPTS
                ))
            })?;
            let vel = DVec2::new(
                rng.random_range(-SPAWN_MAX_SPEED..SPAWN_MAX_SPEED),
                rng.random_range(-SPAWN_MAX_SPEED..SPAWN_MAX_SPEED),
            );
            let mass = rng.random_range(SPAWN_MASS_MIN..SPAWN_MASS_MAX);
            self.particles.push(Particle::new(pos, vel, mass, radius));
        }
        log::info!("spawned {count} random particles (seed {seed})");
        Ok(())
    }

    /// Rejection-sample a position where a circle of `radius` fits without
    /// touching walls, obstacles, or existing particles.
    fn place(&self, radius: f64, rng: &mut Pcg32) -> Option<DVec2> {
        for _ in 0..SPAWN_MAX_ATTEMPTS {
            let pos = DVec2::new(
                rng.random_range(radius..self.arena.width() - radius),
                rng.random_range(radius..self.arena.height() - radius),
            );
            let clear_of_obstacles = self
                .obstacles
                .iter()
                .all(|o| !o.overlaps_circle(pos, radius));
            let clear_of_particles = self
                .particles
                .iter()
                .all(|p| pos.distance(p.pos) >= radius + p.radius);
            if clear_of_obstacles && clear_of_particles {
                return Some(pos);
            }
        }
        None
    }
}
