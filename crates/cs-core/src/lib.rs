//! `cs-core` — foundational types for the `cellsim` agent-based cell simulator.
//!
//! This crate is a dependency of every other `cs-*` crate.  It intentionally
//! has no `cs-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `SubstanceId`                              |
//! | [`geo`]         | `Point3`, `Axis`, `Bounds`, sphere volume helpers     |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `ModuleRng` (per behavior instance), `SimRng` (global)|
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, geometry and config.|

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Axis, Bounds, Point3, sphere_diameter, sphere_volume};
pub use ids::{AgentId, SubstanceId};
pub use rng::{ModuleRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};
