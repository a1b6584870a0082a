//! cell_distribution — a single growing cell filling a bounded cube.
//!
//! One cell of diameter 6 starts in the centre of a 300³ domain and runs a
//! `GrowthModule`: it grows, jitters and divides once it reaches the
//! division diameter.  After 500 steps the live population is listed with
//! its x coordinates.
//!
//! Usage: `cell_distribution [config.json]`.  The optional JSON file is
//! deserialized into a `SimConfig` and replaces the built-in settings.

use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use cs_behavior::GrowthModule;
use cs_core::{Bounds, Point3, SimConfig};
use cs_field::NoField;
use cs_sim::{NoopObserver, SimBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:             u64 = 4357;
const STEPS:            u64 = 500;
const DOMAIN_MIN:       f64 = 0.0;
const DOMAIN_MAX:       f64 = 300.0;
const INITIAL_DIAMETER: f64 = 6.0;

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
    println!("=== cell_distribution ===");
    println!("Steps: {STEPS}  |  Seed: {}  |  Bounds: {:?}", config.seed, config.bounds);
    println!();

    let centre = (DOMAIN_MIN + DOMAIN_MAX) / 2.0;
    let mut sim = SimBuilder::new(config, NoField)
        .add_agent(
            Point3::new(centre, centre, centre),
            INITIAL_DIAMETER,
            vec![Box::new(GrowthModule::new())],
        )
        .build()?;

    let t0 = Instant::now();
    sim.simulate(STEPS, &mut NoopObserver)?;
    info!("simulated {STEPS} steps in {:.3} s", t0.elapsed().as_secs_f64());

    println!("Simulation complete in {:.3} s", t0.elapsed().as_secs_f64());
    println!("Live cells: {}", sim.live_count());
    println!();

    println!("{:<10} {:>12}", "Agent", "x");
    println!("{}", "-".repeat(23));
    let registry = sim.registry();
    for agent in registry.live_ids() {
        let cell = registry.cell_view(agent)?;
        println!("{:<10} {:>12.4}", agent.0, cell.position.x);
    }

    Ok(())
}
