//! drug_response — a cell population exposed to a chemotherapy drug.
//!
//! Cells are scattered uniformly through a 300³ cube centred on the origin.
//! Each carries a `DrugResponseModule` that reads the local drug
//! concentration once per step and survives, divides or dies.
//!
//! - `five-fu`:    no decay, linear gradient 500 → 495 along z over [0, 100],
//!   saturating-exponential dose response.
//! - `irinotecan`: decay 0.03, uniform 500, log-linear dose response.
//!
//! The population is run for 24 steps and then for another 48, with step
//! summaries and periodic snapshots written to `output/<drug>/`.
//!
//! Usage: `drug_response [five-fu|irinotecan] [cells] [config.json]`.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use log::info;

use cs_agent::AgentRegistry;
use cs_behavior::{DoseResponse, DrugResponseModule};
use cs_core::{AgentId, Axis, Bounds, SimConfig, SimRng, SubstanceId, Tick};
use cs_field::{LinearGradient, SubstanceRegistry, SubstanceSpec, Uniform};
use cs_output::{CsvWriter, SimOutputObserver};
use cs_output::writer::OutputWriter;
use cs_sim::{SimBuilder, SimObserver, StepStats};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                  u64   = 4357;
const DEFAULT_CELLS:         usize = 10_000;
const DOMAIN_MIN:            f64   = -150.0;
const DOMAIN_MAX:            f64   = 150.0;
const CELL_DIAMETER:         f64   = 7.5;
const FIELD_RESOLUTION:      u32   = 20;
const DRUG:                  SubstanceId = SubstanceId(0);
const OUTPUT_INTERVAL_TICKS: u64   = 24;
const RUNS:                  [u64; 2] = [24, 48];

// ── Drugs ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug)]
enum Drug {
    FiveFu,
    Irinotecan,
}

impl Drug {
    fn parse(arg: &str) -> Result<Self> {
        match arg {
            "five-fu" | "5-fu" => Ok(Drug::FiveFu),
            "irinotecan"       => Ok(Drug::Irinotecan),
            other => bail!("unknown drug {other:?}, expected five-fu or irinotecan"),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Drug::FiveFu     => "five-fu",
            Drug::Irinotecan => "irinotecan",
        }
    }

    fn response(self) -> DoseResponse {
        match self {
            Drug::FiveFu     => DoseResponse::five_fu(),
            Drug::Irinotecan => DoseResponse::irinotecan(),
        }
    }

    /// Define the drug on a fresh field and fill its initial distribution.
    fn field(self, bounds: Bounds) -> Result<SubstanceRegistry> {
        let mut field = SubstanceRegistry::new(bounds);
        let name = self.name();
        match self {
            Drug::FiveFu => {
                field.define_substance(SubstanceSpec::new(DRUG, name, 0.0, 0.0, FIELD_RESOLUTION))?;
                let gradient = LinearGradient::new(500.0, 495.0, 0.0, 100.0, Axis::Z)?;
                field.initialize_substance(DRUG, name, &gradient)?;
            }
            Drug::Irinotecan => {
                field.define_substance(SubstanceSpec::new(DRUG, name, 0.0, 0.03, FIELD_RESOLUTION))?;
                field.initialize_substance(DRUG, name, &Uniform(500.0))?;
            }
        }
        Ok(field)
    }
}

// ── Observer wrapper to tally events ──────────────────────────────────────────

struct TallyObserver<W: OutputWriter> {
    inner:     SimOutputObserver<W>,
    divisions: usize,
    removals:  usize,
}

impl<W: OutputWriter> TallyObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, divisions: 0, removals: 0 }
    }
}

impl<W: OutputWriter> SimObserver for TallyObserver<W> {
    fn on_division(&mut self, _tick: Tick, _mother: AgentId, _daughter: AgentId) {
        self.divisions += 1;
    }

    fn on_removal(&mut self, _tick: Tick, _agent: AgentId) {
        self.removals += 1;
    }

    fn on_step_end(&mut self, tick: Tick, stats: &StepStats, registry: &AgentRegistry) {
        self.inner.on_step_end(tick, stats, registry);
    }

    fn on_snapshot(&mut self, tick: Tick, registry: &AgentRegistry) {
        self.inner.on_snapshot(tick, registry);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let drug = Drug::parse(args.next().as_deref().unwrap_or("five-fu"))?;
    let cells = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid cell count {n:?}"))?,
        None => DEFAULT_CELLS,
    };
    let config = match args.next() {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {path}"))?
        }
        None => SimConfig {
            seed:                  SEED,
            bounds:                Some(Bounds::new(DOMAIN_MIN, DOMAIN_MAX)?),
            output_interval_ticks: OUTPUT_INTERVAL_TICKS,
            ..SimConfig::default()
        },
    };

    println!("=== drug_response — {} ===", drug.name());
    println!("Cells: {cells}  |  Runs: {RUNS:?} steps  |  Seed: {}", config.seed);
    println!();

    // 1. Field.
    let bounds = match config.bounds {
        Some(b) => b,
        None => Bounds::new(DOMAIN_MIN, DOMAIN_MAX)?,
    };
    let field = drug.field(bounds)?;

    // 2. Population, placed with its own stream so module draws are untouched.
    let mut placement = SimRng::new(config.seed).child(1);
    let mut builder = SimBuilder::new(config.clone(), field);
    for _ in 0..cells {
        let at = placement.point_in_cube(bounds.min, bounds.max);
        builder.push_agent(
            at,
            CELL_DIAMETER,
            vec![Box::new(DrugResponseModule::new(DRUG, drug.response()))],
        );
    }
    let mut sim = builder.build()?;

    // 3. Output.
    let out_dir = PathBuf::from("output").join(drug.name());
    let writer = CsvWriter::new(&out_dir)?;
    let mut obs = TallyObserver::new(SimOutputObserver::new(writer, &config));

    // 4. Run.
    println!("{:<6} {:>8} {:>10} {:>10} {:>10}", "Run", "Hours", "Cells", "Divided", "Died");
    println!("{}", "-".repeat(48));
    let t0 = Instant::now();
    for (run, steps) in RUNS.into_iter().enumerate() {
        sim.simulate(steps, &mut obs)?;
        println!(
            "{:<6} {:>8.1} {:>10} {:>10} {:>10}",
            run + 1,
            sim.clock.elapsed_hours(),
            sim.live_count(),
            obs.divisions,
            obs.removals,
        );
    }
    info!("{} finished in {:.3} s", drug.name(), t0.elapsed().as_secs_f64());

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!();
    println!("Output written to {}", out_dir.display());
    Ok(())
}
