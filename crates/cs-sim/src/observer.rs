//! Simulation observer trait for progress reporting and data collection.

use cs_agent::AgentRegistry;
use cs_core::{AgentId, Tick};

/// Counters for one completed step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Snapshot agents whose modules ran this step.
    pub visited: usize,
    /// Divisions applied (one new agent each).
    pub divisions: usize,
    /// Agents removed.
    pub removals: usize,
    /// Live agents after the step, daughters included.
    pub live: usize,
}

/// Callbacks invoked by [`Sim::simulate`][crate::Sim::simulate] at key
/// points in the step loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — population printer
///
/// ```rust,ignore
/// struct Population;
///
/// impl SimObserver for Population {
///     fn on_step_end(&mut self, tick: Tick, stats: &StepStats, _reg: &AgentRegistry) {
///         println!("{tick}: {} cells", stats.live);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each step, before the field advances.
    fn on_step_start(&mut self, _tick: Tick) {}

    /// Called from the apply phase after `mother` divided into itself and
    /// `daughter`.
    fn on_division(&mut self, _tick: Tick, _mother: AgentId, _daughter: AgentId) {}

    /// Called from the apply phase after `agent` was removed.
    fn on_removal(&mut self, _tick: Tick, _agent: AgentId) {}

    /// Called at the end of each step, after compaction.
    fn on_step_end(&mut self, _tick: Tick, _stats: &StepStats, _registry: &AgentRegistry) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with read-only access to every agent.
    fn on_snapshot(&mut self, _tick: Tick, _registry: &AgentRegistry) {}

    /// Called once when a `simulate` call completes successfully.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call
/// `simulate` but don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
