//! Collisim entry point
//!
//! Loads a scenario (or falls back to the built-in demo), optionally spawns
//! extra random particles, runs the fixed-step simulation, and writes the
//! collision report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use collisim::Scenario;

#[derive(Parser, Debug)]
#[command(version, about = "Fixed-step 2D particle collision simulator")]
struct Args {
    /// Scenario JSON file; omit to run the built-in demo scenario
    scenario: Option<PathBuf>,

    /// Simulated duration in seconds, overriding the scenario's value
    #[arg(short, long)]
    duration: Option<f64>,

    /// Report output path
    #[arg(short, long, default_value = "collision_report.txt")]
    out: PathBuf,

    /// Spawn this many extra randomly placed particles before running
    #[arg(long)]
    spawn: Option<usize>,

    /// Seed for the random spawner, overriding the scenario's seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut scenario = match &args.scenario {
        Some(path) => Scenario::from_file(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => {
            log::info!("no scenario file given, using the built-in demo");
            Scenario::demo()
        }
    };

    if let Some(seed) = args.seed {
        scenario.seed = Some(seed);
    }
    if let Some(count) = args.spawn {
        scenario.spawn_random_particles(count)?;
    }

    let duration = args.duration.unwrap_or(scenario.duration);
    let mut sim = scenario.build();
    sim.run(duration);

    sim.export(&args.out)
        .with_context(|| format!("writing report to {}", args.out.display()))?;

    let counts = sim.event_counts();
    println!(
        "simulated {:.2} s: {} trajectory points, {} collisions ({} wall, {} obstacle, {} merge) -> {}",
        duration,
        sim.total_trajectory_points(),
        counts.total(),
        counts.wall,
        counts.obstacle,
        counts.merge,
        args.out.display()
    );
    Ok(())
}
