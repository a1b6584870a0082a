//! Structure-of-Arrays storage for the physical state of every agent ever
//! created, live or removed.
//!
//! Behavior modules live in a separate [`AgentModules`][crate::AgentModules]
//! column so the scheduler can hold `&AgentStore` and `&mut AgentModules` at
//! the same time:
//!
//! ```ignore
//! // cs-sim intent phase (simplified):
//! let store = &registry.store;
//! let intents: Vec<_> = registry.modules.inner
//!     .par_iter_mut()
//!     .enumerate()
//!     .filter(|(i, _)| store.alive[*i])
//!     .map(|(i, attached)| run_all(store.view(AgentId(i as u32)), attached))
//!     .collect();
//! ```

use cs_core::{AgentId, CoreError, CoreResult, Point3};
use cs_behavior::CellView;

/// Physical state of all agents.
///
/// Every `Vec` has exactly `count` elements and `AgentId` is the index into
/// all of them.  Slots of removed agents are kept (tombstones) so ids stay
/// valid indices for the whole run.
#[derive(Clone, Debug, Default)]
pub struct AgentStore {
    /// Number of slots ever allocated.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Centre of the cell.
    pub position: Vec<Point3>,

    /// Cell diameter; strictly positive while the agent is live.
    pub diameter: Vec<f64>,

    /// `false` once the agent has been removed.
    pub alive: Vec<bool>,

    /// The agent this one was copied from.  `AgentId::INVALID` for founders.
    pub parent: Vec<AgentId>,
}

impl AgentStore {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over every allocated `AgentId` (including tombstones) in
    /// ascending order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Read-only view of one agent for its behavior modules.
    ///
    /// Does not check liveness; callers index with ids from the live list.
    #[inline]
    pub fn view(&self, agent: AgentId) -> CellView {
        let i = agent.index();
        CellView {
            id:       agent,
            position: self.position[i],
            diameter: self.diameter[i],
        }
    }

    /// Fail with `AgentNotFound` / `AgentRemoved` unless `agent` is live.
    pub fn check_live(&self, agent: AgentId) -> CoreResult<()> {
        match self.alive.get(agent.index()) {
            None => Err(CoreError::AgentNotFound(agent)),
            Some(false) => Err(CoreError::AgentRemoved(agent)),
            Some(true) => Ok(()),
        }
    }

    /// Append one slot and return its id.
    pub(crate) fn push(
        &mut self,
        position: Point3,
        diameter: f64,
        parent: AgentId,
    ) -> CoreResult<AgentId> {
        let id = AgentId::try_from(self.count)
            .ok()
            .filter(|id| *id != AgentId::INVALID)
            .ok_or_else(|| CoreError::Config("agent id space exhausted".into()))?;
        self.position.push(position);
        self.diameter.push(diameter);
        self.alive.push(true);
        self.parent.push(parent);
        self.count += 1;
        Ok(id)
    }
}
