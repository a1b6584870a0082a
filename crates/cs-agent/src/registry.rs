//! `AgentRegistry`: the arena that owns every agent and its modules.

use cs_behavior::{BehaviorModule, CellView, CopyEvent};
use cs_core::{AgentId, Bounds, CoreError, CoreResult, Point3, SimRng, sphere_diameter, sphere_volume};

use crate::{AgentModules, AgentStore, AttachedModule, CellState, SplitRule};

/// Owns all agents of one simulation.
///
/// # Snapshot semantics
///
/// The registry keeps an ordered list of the ids that were live at the last
/// [`compact`](Self::compact).  Agents inserted since then are *pending*:
/// they count towards [`live_count`](Self::live_count) and can be mutated,
/// but [`snapshot_live_ids`](Self::snapshot_live_ids) does not return them
/// until the next compaction.  The scheduler compacts once at the end of
/// each step, so daughters are first visited on the following step.
///
/// Removal takes effect immediately: the agent's modules are dropped and
/// every later operation on it fails with [`CoreError::AgentRemoved`].
pub struct AgentRegistry {
    /// Physical cell state, SoA, indexed by id.
    pub store: AgentStore,

    /// Behavior modules, indexed by id.
    pub modules: AgentModules,

    seed:       u64,
    bounds:     Option<Bounds>,
    snapshot:   Vec<AgentId>,
    pending:    Vec<AgentId>,
    live_count: usize,
}

impl AgentRegistry {
    /// An empty registry.  `seed` seeds every module stream; `bounds`, if
    /// set, clamps all positions.
    pub fn new(seed: u64, bounds: Option<Bounds>) -> Self {
        Self {
            store: AgentStore::default(),
            modules: AgentModules::default(),
            seed,
            bounds,
            snapshot: Vec::new(),
            pending: Vec::new(),
            live_count: 0,
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Register a new agent with `modules` attached in order.
    ///
    /// Each module gets its own stream seeded from (seed, new id, slot).
    /// The agent is pending until the next [`compact`](Self::compact).
    pub fn insert(
        &mut self,
        position: Point3,
        diameter: f64,
        modules:  Vec<Box<dyn BehaviorModule>>,
    ) -> CoreResult<AgentId> {
        self.insert_with_parent(CellState::new(position, diameter), modules, AgentId::INVALID)
    }

    fn insert_with_parent(
        &mut self,
        state:   CellState,
        modules: Vec<Box<dyn BehaviorModule>>,
        parent:  AgentId,
    ) -> CoreResult<AgentId> {
        if !(state.diameter.is_finite() && state.diameter > 0.0) {
            return Err(CoreError::Config(format!(
                "agent diameter must be positive and finite, got {}",
                state.diameter
            )));
        }
        if !state.position.is_finite() {
            return Err(CoreError::Config(format!(
                "agent position must be finite, got {}",
                state.position
            )));
        }
        let position = self.clamp(state.position);
        let id = self.store.push(position, state.diameter, parent)?;
        let seed = self.seed;
        let attached = modules
            .into_iter()
            .enumerate()
            .map(|(slot, m)| AttachedModule::new(m, seed, id, slot))
            .collect();
        self.modules.inner.push(attached);
        self.pending.push(id);
        self.live_count += 1;
        Ok(id)
    }

    /// Retire `agent`.  Its modules are dropped immediately.
    pub fn remove(&mut self, agent: AgentId) -> CoreResult<()> {
        self.store.check_live(agent)?;
        self.store.alive[agent.index()] = false;
        self.modules.get_mut(agent).clear();
        self.live_count -= 1;
        Ok(())
    }

    /// Live agents, pending ones included.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    /// Number of agent slots ever allocated (live or removed).
    #[inline]
    pub fn total_created(&self) -> usize {
        self.store.count
    }

    /// The ids live at the last compaction, ascending.
    ///
    /// Agents removed since then are still listed; check
    /// [`is_alive`](Self::is_alive) when iterating.
    #[inline]
    pub fn snapshot_live_ids(&self) -> &[AgentId] {
        &self.snapshot
    }

    /// Drop dead ids from the snapshot and promote pending agents into it.
    ///
    /// Ids are allocated in increasing order, so appending keeps the list
    /// sorted.
    pub fn compact(&mut self) {
        let alive = &self.store.alive;
        self.snapshot.retain(|id| alive[id.index()]);
        self.snapshot
            .extend(self.pending.drain(..).filter(|id| alive[id.index()]));
    }

    /// Every live agent, ascending, pending ones included.
    pub fn live_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.snapshot
            .iter()
            .chain(self.pending.iter())
            .copied()
            .filter(|id| self.store.alive[id.index()])
    }

    /// Split borrow for a scheduler pass: the snapshot and the cell state
    /// read-only, the module column mutable.
    #[inline]
    pub fn pass_parts(&mut self) -> (&[AgentId], &AgentStore, &mut AgentModules) {
        (&self.snapshot, &self.store, &mut self.modules)
    }

    #[inline]
    pub fn is_alive(&self, agent: AgentId) -> bool {
        self.store.alive.get(agent.index()).copied().unwrap_or(false)
    }

    // ── State access ──────────────────────────────────────────────────────

    pub fn cell_view(&self, agent: AgentId) -> CoreResult<CellView> {
        self.store.check_live(agent)?;
        Ok(self.store.view(agent))
    }

    pub fn cell_state(&self, agent: AgentId) -> CoreResult<CellState> {
        self.store.check_live(agent)?;
        let i = agent.index();
        Ok(CellState::new(self.store.position[i], self.store.diameter[i]))
    }

    /// Overwrite position and diameter (position clamped to the bounds).
    pub fn set_state(&mut self, agent: AgentId, state: CellState) -> CoreResult<()> {
        self.store.check_live(agent)?;
        if !(state.diameter.is_finite() && state.diameter > 0.0) {
            return Err(CoreError::InvalidVolume {
                agent,
                volume: sphere_volume(state.diameter),
            });
        }
        let position = self.clamp(state.position);
        let i = agent.index();
        self.store.position[i] = position;
        self.store.diameter[i] = state.diameter;
        Ok(())
    }

    /// Add `delta` to the agent's volume; the diameter follows.
    pub fn change_volume(&mut self, agent: AgentId, delta: f64) -> CoreResult<()> {
        self.store.check_live(agent)?;
        let i = agent.index();
        let volume = sphere_volume(self.store.diameter[i]) + delta;
        if !(volume.is_finite() && volume > 0.0) {
            return Err(CoreError::InvalidVolume { agent, volume });
        }
        self.store.diameter[i] = sphere_diameter(volume);
        Ok(())
    }

    /// Displace the agent by `delta`, clamped to the bounds.
    pub fn translate(&mut self, agent: AgentId, delta: Point3) -> CoreResult<()> {
        self.store.check_live(agent)?;
        let i = agent.index();
        let position = self.clamp(self.store.position[i] + delta);
        self.store.position[i] = position;
        Ok(())
    }

    /// Division capability reported by the agent's modules: the first
    /// module that tracks the flag wins, `None` if none does.
    pub fn can_divide(&self, agent: AgentId) -> CoreResult<Option<bool>> {
        self.store.check_live(agent)?;
        Ok(self
            .modules
            .get(agent)
            .iter()
            .find_map(|m| m.module.can_divide()))
    }

    /// Set the division-capability flag on every module of `agent` that has
    /// one.  Returns whether any module accepted it.
    pub fn set_can_divide(&mut self, agent: AgentId, can_divide: bool) -> CoreResult<bool> {
        self.store.check_live(agent)?;
        let mut accepted = false;
        for m in self.modules.get_mut(agent) {
            accepted |= m.module.set_can_divide(can_divide);
        }
        Ok(accepted)
    }

    // ── Copy events ───────────────────────────────────────────────────────

    /// Create a new agent from `source` with physical `state`.
    ///
    /// Each of the source's modules is replicated for `event` onto the new
    /// agent (fresh streams, same slots), then told about the copy via
    /// [`BehaviorModule::on_copied`].  The new agent is pending.
    pub fn replicate(
        &mut self,
        source: AgentId,
        event:  CopyEvent,
        state:  CellState,
    ) -> CoreResult<AgentId> {
        self.store.check_live(source)?;
        let copies = self
            .modules
            .get(source)
            .iter()
            .map(|m| m.module.replicate(event))
            .collect();
        let id = self.insert_with_parent(state, copies, source)?;
        for m in self.modules.get_mut(source) {
            m.module.on_copied(event);
        }
        Ok(id)
    }

    /// Split `mother` with `rule`: the mother takes the first daughter state
    /// and a new agent (visible from the next pass) takes the second.
    pub fn divide(
        &mut self,
        mother: AgentId,
        rule:   &dyn SplitRule,
        rng:    &mut SimRng,
    ) -> CoreResult<AgentId> {
        let before = self.cell_state(mother)?;
        let (kept, daughter) = rule.split(before, rng);
        self.set_state(mother, kept)?;
        self.replicate(mother, CopyEvent::CellDivision, daughter)
    }

    #[inline]
    fn clamp(&self, p: Point3) -> Point3 {
        match self.bounds {
            Some(b) => b.clamp(p),
            None => p,
        }
    }
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("live", &self.live_count)
            .field("created", &self.store.count)
            .field("pending", &self.pending.len())
            .finish()
    }
}
