//! `cs-agent` — agent storage and lifecycle for the `cellsim` simulator.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`store`]      | `AgentStore` (SoA cell state)                                 |
//! | [`modules`]    | `AgentModules`, `AttachedModule` (behavior + its RNG stream)  |
//! | [`registry`]   | `AgentRegistry` (insert / remove / snapshot / divide / copy)  |
//! | [`split`]      | `CellState`, `SplitRule` trait, `SymmetricSplit`              |
//! | [`builder`]    | `RegistryBuilder` (fluent construction of a founder population) |
//!
//! # Lifecycle in one paragraph
//!
//! Agents live in an arena indexed by [`AgentId`][cs_core::AgentId].  Ids
//! are handed out in increasing order and never reused; removal leaves a
//! tombstone.  A newly inserted agent is *pending* until the next
//! [`AgentRegistry::compact`], so the snapshot a scheduler pass iterates
//! never contains agents born during that pass.

pub mod builder;
pub mod modules;
pub mod registry;
pub mod split;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::RegistryBuilder;
pub use modules::{AgentModules, AttachedModule};
pub use registry::AgentRegistry;
pub use split::{CellState, SplitRule, SymmetricSplit};
pub use store::AgentStore;
