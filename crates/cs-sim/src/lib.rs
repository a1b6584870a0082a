//! `cs-sim` — step loop orchestrator for the cellsim framework.
//!
//! # Two-phase step loop
//!
//! ```text
//! for each of `steps` steps:
//!   ① Field    — FieldSolver::advance, field_substeps times.
//!   ② Snapshot — live ids as of the last compaction (ascending).
//!   ③ Intents  — run every snapshot agent's modules
//!                (parallel with the `parallel` feature).
//!   ④ Apply    — for each agent in ascending AgentId order:
//!                  ChangeVolume(dv) → grow
//!                  Translate(v)     → move (clamped)
//!                  Divide           → split; daughter pending
//!                  Remove           → retire
//!   ⑤ Compact  — daughters join the snapshot for the next step.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the intent phase on Rayon's thread pool.          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cs_behavior::GrowthModule;
//! use cs_core::{Point3, SimConfig};
//! use cs_field::NoField;
//! use cs_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), NoField)
//!     .add_agent(Point3::ORIGIN, 6.0, vec![Box::new(GrowthModule::new())])
//!     .build()?;
//! sim.simulate(100, &mut NoopObserver)?;
//! println!("{} cells", sim.live_count());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, StepStats};
pub use sim::{SchedulerState, Sim};
