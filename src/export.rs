//! Plain-text simulation report writer
//!
//! Serializes a finished run into a report with four parts: a header block,
//! one line per recorded trajectory sample, one line per collision event,
//! and a summary with per-kind totals. The comma-separated data lines
//! (`time,particle_index,x,y` and `time,description`) are the part external
//! tooling parses; the `#` decoration around them is cosmetic.
//!
//! Export failures are isolated from the simulation: a write error reaches
//! the caller and leaves the in-memory state untouched.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::sim::Simulator;

const RULE: &str = "# ============================================";

/// Write the full report for `sim` to a file at `path`.
pub fn export_to_file(sim: &Simulator, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_report(sim, &mut writer)?;
    writer.flush()?;
    log::info!("report written to {}", path.display());
    Ok(())
}

/// Write the report to any `Write` destination.
pub fn write_report<W: Write>(sim: &Simulator, writer: &mut W) -> Result<()> {
    write_header(sim, writer)?;
    write_trajectories(sim, writer)?;
    write_events(sim, writer)?;
    write_summary(sim, writer)?;
    Ok(())
}

fn write_header<W: Write>(sim: &Simulator, w: &mut W) -> Result<()> {
    let arena = sim.arena();
    writeln!(w, "{RULE}")?;
    writeln!(w, "# Multi-collision simulation report")?;
    writeln!(w, "{RULE}")?;
    writeln!(
        w,
        "# Arena dimensions: {} x {}",
        arena.width(),
        arena.height()
    )?;
    writeln!(w, "# Time step (dt): {} s", sim.dt())?;
    writeln!(
        w,
        "# Initial particle count: {}",
        sim.initial_particle_count()
    )?;
    writeln!(w, "# Obstacle count: {}", sim.obstacles().len())?;
    writeln!(w, "# Restitution coefficient: {}", sim.restitution())?;
    writeln!(w, "{RULE}")?;
    writeln!(w)?;
    Ok(())
}

/// Sample times are reconstructed as `sample_index * dt`. For particles
/// born from a merge the clock restarts at zero; the merge event in the
/// collision section carries the absolute time.
fn write_trajectories<W: Write>(sim: &Simulator, w: &mut W) -> Result<()> {
    writeln!(w, "# TRAJECTORIES")?;
    writeln!(w, "# Format: time,particle_index,x,y")?;
    writeln!(w, "{RULE}")?;
    let dt = sim.dt();
    for (index, trajectory) in sim.trajectories().iter().enumerate() {
        for (sample, pos) in trajectory.iter().enumerate() {
            let time = sample as f64 * dt;
            writeln!(w, "{:.4},{},{:.4},{:.4}", time, index, pos.x, pos.y)?;
        }
    }
    writeln!(w)?;
    Ok(())
}

fn write_events<W: Write>(sim: &Simulator, w: &mut W) -> Result<()> {
    writeln!(w, "# COLLISIONS")?;
    writeln!(w, "# Format: time,description")?;
    writeln!(w, "{RULE}")?;
    for event in sim.events() {
        writeln!(w, "{:.4},{}", event.time, event.description)?;
    }
    writeln!(w)?;
    Ok(())
}

fn write_summary<W: Write>(sim: &Simulator, w: &mut W) -> Result<()> {
    let counts = sim.event_counts();
    writeln!(w, "{RULE}")?;
    writeln!(w, "# SUMMARY")?;
    writeln!(w, "{RULE}")?;
    writeln!(
        w,
        "# Total trajectory points: {}",
        sim.total_trajectory_points()
    )?;
    writeln!(w, "# Total collisions: {}", counts.total())?;
    writeln!(w, "# Wall collisions: {}", counts.wall)?;
    writeln!(w, "# Obstacle collisions: {}", counts.obstacle)?;
    writeln!(w, "# Particle merges: {}", counts.merge)?;
    writeln!(w, "{RULE}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Particle;
    use glam::DVec2;

    fn report_for(sim: &Simulator) -> String {
        let mut buf = Vec::new();
        write_report(sim, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn small_run() -> Simulator {
        let mut sim = Simulator::new(100.0, 100.0, 0.1);
        sim.add_particle(Particle::new(
            DVec2::new(90.0, 50.0),
            DVec2::new(60.0, 0.0),
            1.0,
            5.0,
        ));
        sim.run(0.2);
        sim
    }

    #[test]
    fn test_header_names_the_setup() {
        let report = report_for(&small_run());
        assert!(report.contains("# Arena dimensions: 100 x 100"));
        assert!(report.contains("# Time step (dt): 0.1 s"));
        assert!(report.contains("# Initial particle count: 1"));
        assert!(report.contains("# Obstacle count: 0"));
        assert!(report.contains("# Restitution coefficient: 0.7"));
    }

    #[test]
    fn test_trajectory_lines_are_comma_separated_samples() {
        let sim = small_run();
        let report = report_for(&sim);

        let data_lines: Vec<&str> = report
            .lines()
            .filter(|l| !l.starts_with('#') && !l.is_empty() && l.split(',').count() == 4)
            .collect();
        assert_eq!(data_lines.len(), sim.total_trajectory_points());

        // First sample: one step of dt 0.1 bounced the particle back to the
        // clamp position at x = 95.
        assert_eq!(data_lines[0], "0.0000,0,95.0000,50.0000");
        assert!(data_lines[1].starts_with("0.1000,0,"));
    }

    #[test]
    fn test_event_lines_carry_time_and_description() {
        let sim = small_run();
        let report = report_for(&sim);
        let events: Vec<&str> = report
            .lines()
            .filter(|l| l.contains("hits the right wall"))
            .collect();
        assert_eq!(events.len(), sim.event_counts().wall);
        assert!(events[0].starts_with("0.0000,Particle 0"));
    }

    #[test]
    fn test_summary_totals_match_the_state() {
        let sim = small_run();
        let report = report_for(&sim);
        assert!(report.contains(&format!(
            "# Total trajectory points: {}",
            sim.total_trajectory_points()
        )));
        assert!(report.contains(&format!(
            "# Total collisions: {}",
            sim.event_counts().total()
        )));
        assert!(report.contains(&format!("# Wall collisions: {}", sim.event_counts().wall)));
        assert!(report.contains("# Obstacle collisions: 0"));
        assert!(report.contains("# Particle merges: 0"));
    }

    #[test]
    fn test_sections_appear_in_order() {
        let report = report_for(&small_run());
        let traj = report.find("# TRAJECTORIES").unwrap();
        let coll = report.find("# COLLISIONS").unwrap();
        let summary = report.find("# SUMMARY").unwrap();
        assert!(traj < coll && coll < summary);
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let sim = small_run();
        let err = export_to_file(&sim, "/nonexistent-dir/report.txt");
        assert!(err.is_err());
        // The run record is untouched by the failed export.
        assert!(sim.is_finished());
        assert_eq!(sim.total_trajectory_points(), 2);
    }
}
