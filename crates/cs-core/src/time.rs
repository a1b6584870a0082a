//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter: one
//! tick is one scheduler timestep, during which the field is advanced and
//! every live agent's modules run exactly once.
//!
//! Two separate scales hang off a tick:
//!
//! - `SimConfig::time_step` — the *model* time step that scales rates
//!   (volume growth, diffusion, decay).  Default 0.01.
//! - `SimConfig::tick_duration_secs` — how much wall-clock time a tick
//!   stands for in reports.  The drug experiments read one tick as one hour.

use std::fmt;

use crate::{Bounds, CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Index of a scheduler step, counted from the start of the run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The step after this one.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, steps: u64) -> Tick {
        Tick(self.0 + steps)
    }
}

/// Steps between two ticks.  Panics in debug builds if `rhs` is later.
impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The scheduler's step counter plus the tick-to-hours mapping used in
/// reports.  Persists across `simulate` calls so chained runs continue the
/// same timeline.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Reporting seconds per tick.
    pub tick_duration_secs: u32,
    /// The next step to run.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_secs: u32) -> Self {
        Self { tick_duration_secs, current_tick: Tick::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.next();
    }

    /// Reporting hours covered by the steps completed so far.
    #[inline]
    pub fn elapsed_hours(&self) -> f64 {
        self.current_tick.0 as f64 * self.tick_duration_secs as f64 / 3_600.0
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1} h)", self.current_tick, self.elapsed_hours())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// The demos build this in code or load it from a JSON file (with the
/// `serde` feature) and pass it to the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Seeds every module stream and the division-axis stream.
    pub seed: u64,

    /// Model time per tick.  Growth rates and the field solver are scaled
    /// by it.  Default: 0.01.
    pub time_step: f64,

    /// Reporting seconds per tick.  Default: 3600.
    pub tick_duration_secs: u32,

    /// Field-solver steps per scheduler tick (each of `time_step /
    /// field_substeps`).  Default: 1.
    pub field_substeps: u32,

    /// Cubic domain that agent positions are clamped into.  `None` leaves
    /// space unbounded.
    pub bounds: Option<Bounds>,

    /// Rayon workers for the intent phase (`parallel` feature).  `None`
    /// uses the global pool; `Some(1)` runs it on the calling thread.
    pub num_threads: Option<usize>,

    /// Emit a population snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                  0,
            time_step:             0.01,
            tick_duration_secs:    3_600,
            field_substeps:        1,
            bounds:                None,
            num_threads:           None,
            output_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// Reject settings the scheduler cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(CoreError::Config(format!(
                "time_step must be positive and finite, got {}",
                self.time_step
            )));
        }
        if self.field_substeps == 0 {
            return Err(CoreError::Config("field_substeps must be at least 1".into()));
        }
        if self.num_threads == Some(0) {
            return Err(CoreError::Config("num_threads must be at least 1".into()));
        }
        if let Some(b) = self.bounds {
            Bounds::new(b.min, b.max)?;
        }
        Ok(())
    }

    /// Model time covered by one field-solver step.
    #[inline]
    pub fn field_dt(&self) -> f64 {
        self.time_step / self.field_substeps.max(1) as f64
    }

    /// A clock at tick 0 with this run's tick duration.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_secs)
    }
}
