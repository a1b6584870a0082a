//! Fluent builder for constructing a [`Sim`].

use cs_agent::{RegistryBuilder, SplitRule, SymmetricSplit};
use cs_behavior::BehaviorModule;
use cs_core::{Point3, SimConfig, SimRng};
use cs_field::FieldSolver;

use crate::{SchedulerState, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<F>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: seed, time step, bounds, …
/// - `F: FieldSolver`: the substance field (e.g. [`cs_field::SubstanceRegistry`],
///   or [`cs_field::NoField`] when no module reads concentrations)
///
/// # Optional inputs (have defaults)
///
/// | Method                      | Default            |
/// |-----------------------------|--------------------|
/// | `.add_agent(pos, d, mods)`  | no agents          |
/// | `.split_rule(r)`            | `SymmetricSplit`   |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, NoField)
///     .add_agent(Point3::new(150.0, 150.0, 150.0), 6.0, vec![Box::new(GrowthModule::new())])
///     .build()?;
/// sim.simulate(500, &mut NoopObserver)?;
/// ```
pub struct SimBuilder<F: FieldSolver> {
    config:     SimConfig,
    field:      F,
    agents:     RegistryBuilder,
    split_rule: Option<Box<dyn SplitRule>>,
}

impl<F: FieldSolver> SimBuilder<F> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, field: F) -> Self {
        let agents = RegistryBuilder::new(config.seed);
        Self {
            config,
            field,
            agents,
            split_rule: None,
        }
    }

    /// Queue one initial agent with its modules.
    pub fn add_agent(
        mut self,
        position: Point3,
        diameter: f64,
        modules:  Vec<Box<dyn BehaviorModule>>,
    ) -> Self {
        self.agents.push_agent(position, diameter, modules);
        self
    }

    /// Queue one initial agent (non-consuming form, for population loops).
    pub fn push_agent(
        &mut self,
        position: Point3,
        diameter: f64,
        modules:  Vec<Box<dyn BehaviorModule>>,
    ) -> &mut Self {
        self.agents.push_agent(position, diameter, modules);
        self
    }

    /// Replace the geometric division rule.
    pub fn split_rule(mut self, rule: impl SplitRule + 'static) -> Self {
        self.split_rule = Some(Box::new(rule));
        self
    }

    /// Validate the configuration, register the initial agents, and return
    /// an `Idle` [`Sim`].
    pub fn build(self) -> SimResult<Sim<F>> {
        self.config
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;

        let mut agents = self.agents;
        if let Some(bounds) = self.config.bounds {
            agents = agents.bounds(bounds);
        }
        let registry = agents
            .build()
            .map_err(|e| SimError::Config(e.to_string()))?;

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) if n > 1 => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SimError::Config(format!("thread pool: {e}")))?,
            ),
            _ => None,
        };

        Ok(Sim {
            clock:      self.config.make_clock(),
            rng:        SimRng::new(self.config.seed),
            config:     self.config,
            registry,
            field:      self.field,
            split_rule: self.split_rule.unwrap_or_else(|| Box::new(SymmetricSplit)),
            state:      SchedulerState::Idle,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
