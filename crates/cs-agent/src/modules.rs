//! Per-agent behavior modules, stored apart from [`AgentStore`][crate::AgentStore].

use cs_behavior::BehaviorModule;
use cs_core::{AgentId, ModuleRng};

/// A behavior module paired with the RNG stream it was attached with.
///
/// The pair always moves together; the stream is seeded exactly once, when
/// the module is attached to its agent.
pub struct AttachedModule {
    pub module: Box<dyn BehaviorModule>,
    pub rng:    ModuleRng,
}

impl AttachedModule {
    /// Attach `module` to `agent` in position `slot` of its module list.
    pub fn new(module: Box<dyn BehaviorModule>, global_seed: u64, agent: AgentId, slot: usize) -> Self {
        Self {
            module,
            rng: ModuleRng::new(global_seed, agent, slot),
        }
    }
}

impl std::fmt::Debug for AttachedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachedModule")
            .field("module", &self.module.name())
            .field("steps", &self.module.steps())
            .finish()
    }
}

/// Module lists of every agent, indexed by `AgentId`.
///
/// `AgentModules` is `Send` but each inner list is only ever touched by one
/// worker at a time: Rayon's `par_iter_mut()` hands out disjoint `&mut`
/// slots.  A removed agent's list is emptied, dropping its modules.
#[derive(Debug, Default)]
pub struct AgentModules {
    pub inner: Vec<Vec<AttachedModule>>,
}

impl AgentModules {
    #[inline]
    pub fn get(&self, agent: AgentId) -> &[AttachedModule] {
        &self.inner[agent.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut Vec<AttachedModule> {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
