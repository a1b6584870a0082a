//! Deterministic per-module and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Every behavior module attached to an agent owns its own `SmallRng`
//! stream, seeded exactly once when the module is registered:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT) XOR (slot * SLOT_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.
//! This means:
//!
//! - Module instances never share RNG state (no contention, no ordering
//!   dependency), so the intent phase can run in parallel.
//! - Agent ids are allocated deterministically, so daughters created by
//!   division get reproducible streams too.
//! - Nothing is ever reseeded from the wall clock.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, Point3};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Second odd constant so (agent, slot) pairs don't collide along diagonals.
const SLOT_CONSTANT: u64 = 0xc2b2_ae3d_27d4_eb4f;

/// Offset applied to the global seed for the simulation-level stream.
const SIM_STREAM: u64 = 0x5851_f42d_4c95_7f2d;

/// Uniform sample in `[low, high)`; a degenerate range yields `low`.
#[inline]
fn uniform_in(rng: &mut SmallRng, low: f64, high: f64) -> f64 {
    if high <= low {
        return low;
    }
    rng.gen_range(low..high)
}

// ── ModuleRng ─────────────────────────────────────────────────────────────────

/// The RandomSource of one behavior-module instance.
///
/// Created by the agent registry when a module is attached; stored next to
/// the module so the pair moves together.  The type is `Send` but not meant
/// to be shared: each worker holds exclusive `&mut` access to the streams of
/// the agents it is updating.
#[derive(Clone, Debug)]
pub struct ModuleRng(SmallRng);

impl ModuleRng {
    /// Seed deterministically from the run's global seed, the owning agent,
    /// and the module's slot in that agent's module list.
    pub fn new(global_seed: u64, agent: AgentId, slot: usize) -> Self {
        let seed = global_seed
            ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT)
            ^ (slot as u64).wrapping_mul(SLOT_CONSTANT);
        ModuleRng(SmallRng::seed_from_u64(seed))
    }

    /// A stream seeded directly with `seed` (test harnesses, host tooling).
    pub fn from_seed(seed: u64) -> Self {
        ModuleRng(SmallRng::seed_from_u64(seed))
    }

    /// Restart the stream from `value`.
    ///
    /// Intended for test harnesses; behavior modules must never call this
    /// from their per-step update.
    pub fn seed(&mut self, value: u64) {
        self.0 = SmallRng::seed_from_u64(value);
    }

    /// Uniformly distributed double in `[low, high)`.
    #[inline]
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        uniform_in(&mut self.0, low, high)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (division axes, initial
/// placement in host harnesses).
///
/// Used only in single-threaded contexts: the scheduler draws from it during
/// the sequential apply phase, so the draw order is the agent-id order.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed ^ SIM_STREAM))
    }

    /// Derive an auxiliary stream (e.g. initial placement) from this one.
    /// Deterministic for a given root seed and `offset`.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Uniformly distributed double in `[low, high)`.
    #[inline]
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        uniform_in(&mut self.0, low, high)
    }

    /// A point drawn uniformly from the cube `[low, high)³`.
    pub fn point_in_cube(&mut self, low: f64, high: f64) -> Point3 {
        Point3::new(
            self.uniform(low, high),
            self.uniform(low, high),
            self.uniform(low, high),
        )
    }

    /// A direction drawn uniformly on the unit sphere.
    pub fn unit_vector(&mut self) -> Point3 {
        let z = self.uniform(-1.0, 1.0);
        let phi = self.uniform(0.0, std::f64::consts::TAU);
        let r = (1.0 - z * z).max(0.0).sqrt();
        Point3::new(r * phi.cos(), r * phi.sin(), z)
    }
}
