//! cell_number — population growth of a cell line that can lose its
//! ability to divide.
//!
//! A single cell runs a `ConstrainedGrowthModule`.  Every division attempt
//! fails with probability 0.1, after which the cell never divides again.
//! The simulation is run as 50 chained runs of 10 steps and the
//! population is printed after each run.
//!
//! Usage: `cell_number [config.json]`.

use anyhow::{Context, Result};

use cs_behavior::ConstrainedGrowthModule;
use cs_core::{Bounds, Point3, SimConfig};
use cs_field::NoField;
use cs_sim::{NoopObserver, SimBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:             u64   = 4357;
const RUNS:             usize = 50;
const STEPS_PER_RUN:    u64   = 10;
const INITIAL_DIAMETER: f64   = 6.35;
const DOMAIN_MIN:       f64   = 0.0;
const DOMAIN_MAX:       f64   = 300.0;

fn load_config() -> Result<SimConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {path}"))
        }
        None => Ok(SimConfig {
            seed:                  SEED,
            bounds:                Some(Bounds::new(DOMAIN_MIN, DOMAIN_MAX)?),
            output_interval_ticks: 0,
            ..SimConfig::default()
        }),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let config = load_config()?;
    println!("=== cell_number ===");
    println!("Runs: {RUNS} × {STEPS_PER_RUN} steps  |  Seed: {}", config.seed);
    println!();

    let centre = (DOMAIN_MIN + DOMAIN_MAX) / 2.0;
    let mut sim = SimBuilder::new(config, NoField)
        .add_agent(
            Point3::new(centre, centre, centre),
            INITIAL_DIAMETER,
            vec![Box::new(ConstrainedGrowthModule::new(true))],
        )
        .build()?;

    println!("{:<6} {:>8} {:>10}", "Run", "Step", "Cells");
    println!("{}", "-".repeat(26));
    for run in 1..=RUNS {
        sim.simulate(STEPS_PER_RUN, &mut NoopObserver)?;
        println!("{:<6} {:>8} {:>10}", run, sim.now().0, sim.live_count());
    }

    let dividing = sim
        .registry()
        .live_ids()
        .filter(|&agent| matches!(sim.registry().can_divide(agent), Ok(Some(true))))
        .count();
    println!();
    println!("Still dividing: {dividing} of {}", sim.live_count());

    Ok(())
}
