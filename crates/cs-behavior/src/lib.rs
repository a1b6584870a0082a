//! `cs-behavior` — pluggable per-agent behavior modules.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                        |
//! |-----------------|-----------------------------------------------------------------|
//! | [`intent`]      | `Intent` enum (`ChangeVolume`, `Translate`, `Divide`, `Remove`) |
//! | [`context`]     | `CellView`, `StepContext<'a>` — read-only step inputs           |
//! | [`event`]       | `CopyEvent` — division vs. generic copy                         |
//! | [`model`]       | `BehaviorModule` trait                                          |
//! | [`growth`]      | `GrowthModule` — size-gated division with random migration      |
//! | [`constrained`] | `ConstrainedGrowthModule` — 90 % division roll, one-way stop    |
//! | [`drug`]        | `DrugResponseModule`, `DoseResponse`, `Fate`                    |
//! | [`error`]       | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! # Design notes
//!
//! The scheduler in cs-sim runs every step in two phases:
//!
//! 1. **Intent phase** (optionally parallel): every live agent's modules are
//!    called with a [`CellView`] of that agent, a shared [`StepContext`], and
//!    the module's own RNG stream.  Modules mutate only their own state
//!    (counters, flags) and describe agent changes as [`Intent`]s.
//!
//! 2. **Apply phase** (sequential): intents are applied to the agent
//!    registry in ascending agent-id order.
//!
//! Because a module never sees another agent's state, and each module owns
//! its stream, the outcome does not depend on thread scheduling.

pub mod constrained;
pub mod context;
pub mod drug;
pub mod error;
pub mod event;
pub mod growth;
pub mod intent;
pub mod model;


pub use constrained::{ConstrainedGrowthModule, ConstrainedGrowthParams};
pub use context::{CellView, StepContext};
pub use drug::{DoseResponse, DrugResponseModule, Fate};
pub use error::{BehaviorError, BehaviorResult};
pub use event::CopyEvent;
pub use growth::{GrowthModule, GrowthParams};
pub use intent::Intent;
pub use model::BehaviorModule;
