//! Fluent builder for a founder population.
//!
//! # Usage
//!
//! ```rust
//! use cs_agent::RegistryBuilder;
//! use cs_behavior::GrowthModule;
//! use cs_core::Point3;
//!
//! let registry = RegistryBuilder::new(/*seed=*/ 42)
//!     .agent(Point3::ORIGIN, 7.5, vec![Box::new(GrowthModule::new())])
//!     .agent(Point3::new(10.0, 0.0, 0.0), 7.5, vec![Box::new(GrowthModule::new())])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(registry.live_count(), 2);
//! assert_eq!(registry.snapshot_live_ids().len(), 2);
//! ```

use cs_behavior::BehaviorModule;
use cs_core::{Bounds, CoreResult, Point3};

use crate::AgentRegistry;

struct Founder {
    position: Point3,
    diameter: f64,
    modules:  Vec<Box<dyn BehaviorModule>>,
}

/// Fluent builder for an [`AgentRegistry`] with its initial agents.
///
/// Founders are registered in the order they were added, so the first one
/// gets `AgentId(0)`.  Validation happens in [`build`](Self::build).
pub struct RegistryBuilder {
    seed:     u64,
    bounds:   Option<Bounds>,
    founders: Vec<Founder>,
}

impl RegistryBuilder {
    /// Create a builder using `seed` as the global seed for module streams.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            bounds: None,
            founders: Vec::new(),
        }
    }

    /// Clamp all positions into `bounds`.
    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Queue one founder agent.
    pub fn agent(
        mut self,
        position: Point3,
        diameter: f64,
        modules:  Vec<Box<dyn BehaviorModule>>,
    ) -> Self {
        self.founders.push(Founder { position, diameter, modules });
        self
    }

    /// Queue one founder agent (non-consuming form, for loops).
    pub fn push_agent(
        &mut self,
        position: Point3,
        diameter: f64,
        modules:  Vec<Box<dyn BehaviorModule>>,
    ) -> &mut Self {
        self.founders.push(Founder { position, diameter, modules });
        self
    }

    pub fn len(&self) -> usize {
        self.founders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.founders.is_empty()
    }

    /// Register every founder and compact, so they are all in the first
    /// snapshot.
    pub fn build(self) -> CoreResult<AgentRegistry> {
        let mut registry = AgentRegistry::new(self.seed, self.bounds);
        for f in self.founders {
            registry.insert(f.position, f.diameter, f.modules)?;
        }
        registry.compact();
        Ok(registry)
    }
}
