//! The `Sim` struct and its step loop.

use log::{debug, info, trace, warn};

use cs_agent::{AgentModules, AgentRegistry, AgentStore, AttachedModule, SplitRule};
use cs_behavior::{CellView, Intent, StepContext};
use cs_core::{AgentId, SimClock, SimConfig, SimRng, Tick};
use cs_field::FieldSolver;

use crate::{SimError, SimObserver, SimResult, StepStats};

/// Scheduler state.  `Stepping` only while a `simulate` call is running.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Stepping,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<F>` owns the agent registry and the field and drives the step loop:
///
/// 1. **Field**: [`FieldSolver::advance`] `config.field_substeps` times.
/// 2. **Snapshot**: the registry's live list as of the last compaction.
/// 3. **Intent phase** (optionally parallel with the `parallel` feature):
///    every snapshot agent's modules run in attachment order and return
///    [`Intent`]s.  A `Remove` ends that agent's module chain.
/// 4. **Apply phase** (sequential, ascending `AgentId` for determinism):
///    - `ChangeVolume(dv)` → grow / shrink.
///    - `Translate(v)`     → move, clamped to the bounds.
///    - `Divide`           → split via the `SplitRule`; the daughter is pending.
///    - `Remove`           → retire; nothing after it is applied.
/// 5. **Compact**: pending daughters join the snapshot for the next step.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<F: FieldSolver> {
    /// Global configuration (seed, time step, bounds, …).
    pub config: SimConfig,

    /// Simulation clock: tracks the current tick and maps it to hours.
    pub clock: SimClock,

    pub(crate) registry:   AgentRegistry,
    pub(crate) field:      F,
    pub(crate) split_rule: Box<dyn SplitRule>,
    pub(crate) rng:        SimRng,
    pub(crate) state:      SchedulerState,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<F: FieldSolver> Sim<F> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run `steps` steps from the current state.
    ///
    /// May be called any number of times; each call resumes where the last
    /// one stopped, so two calls of `n` and `m` steps give the same result
    /// as one call of `n + m`.  A failing step aborts the call, the state
    /// returns to `Idle` and the error is returned.
    pub fn simulate<O: SimObserver>(&mut self, steps: u64, observer: &mut O) -> SimResult<()> {
        info!(
            "simulating {steps} steps from {} with {} live agents",
            self.clock,
            self.registry.live_count()
        );
        self.state = SchedulerState::Stepping;
        // Pick up agents a host inserted between runs.
        self.registry.compact();

        let result = self.run_steps(steps, observer);
        self.state = SchedulerState::Idle;

        match result {
            Ok(()) => {
                observer.on_sim_end(self.clock.current_tick);
                info!(
                    "finished at {} with {} live agents",
                    self.clock,
                    self.registry.live_count()
                );
                Ok(())
            }
            Err(e) => {
                warn!("step {} aborted: {e}", self.clock.current_tick);
                Err(e)
            }
        }
    }

    #[inline]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Live agents, daughters of the last step included.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.registry.live_count()
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Mutable registry access for hosts between `simulate` calls
    /// (inserting agents, setting flags).
    pub fn registry_mut(&mut self) -> &mut AgentRegistry {
        &mut self.registry
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut F {
        &mut self.field
    }

    // ── Core step processing ──────────────────────────────────────────────

    fn run_steps<O: SimObserver>(&mut self, steps: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..steps {
            let now = self.clock.current_tick;

            observer.on_step_start(now);
            let stats = self.process_step(now, observer)?;
            debug!(
                "{now}: visited {}, divisions {}, removals {}, live {}",
                stats.visited, stats.divisions, stats.removals, stats.live
            );
            observer.on_step_end(now, &stats, &self.registry);

            let interval = self.config.output_interval_ticks;
            if interval > 0 && now.0.is_multiple_of(interval) {
                observer.on_snapshot(now, &self.registry);
            }

            self.clock.advance();
        }
        Ok(())
    }

    fn process_step<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<StepStats> {
        // ── Phase 1: advance the field ────────────────────────────────────
        let dt = self.config.field_dt();
        for _ in 0..self.config.field_substeps {
            self.field.advance(dt)?;
        }

        // ── Phases 2 + 3: snapshot and intent phase (produce) ─────────────
        let intents = self.compute_intents(now)?;

        // ── Phase 4: apply phase (consume) ────────────────────────────────
        //
        // Intents arrive in ascending AgentId order (the snapshot is sorted).
        // Sequential application in this order makes results deterministic
        // even when the intent phase ran in parallel.
        let mut stats = StepStats { visited: intents.len(), ..StepStats::default() };
        for (agent, agent_intents) in intents {
            self.apply_intents(agent, agent_intents, now, &mut stats, observer)?;
        }

        // ── Phase 5: daughters become visible to the next step ────────────
        self.registry.compact();
        stats.live = self.registry.live_count();
        Ok(stats)
    }

    /// Run every snapshot agent's modules.
    ///
    /// With the `parallel` Cargo feature the module column is walked on
    /// Rayon's thread pool; each worker gets disjoint `&mut` module slots.
    /// `num_threads: Some(1)` keeps the sequential walk.
    fn compute_intents(&mut self, now: Tick) -> SimResult<Vec<(AgentId, Vec<Intent>)>> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let field = &self.field;
        let ctx = StepContext::new(now, self.config.time_step, field);
        let (snapshot, store, modules) = self.registry.pass_parts();

        #[cfg(not(feature = "parallel"))]
        {
            sequential_intents(snapshot, store, modules, &ctx)
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            if self.config.num_threads == Some(1) {
                return sequential_intents(snapshot, store, modules, &ctx);
            }

            let mut work = || {
                modules
                    .inner
                    .par_iter_mut()
                    .enumerate()
                    .map(|(i, attached)| (AgentId(i as u32), attached))
                    .filter(|(agent, _)| {
                        store.alive[agent.index()] && snapshot.binary_search(agent).is_ok()
                    })
                    .map(|(agent, attached)| {
                        run_modules(store.view(agent), attached, &ctx).map(|i| (agent, i))
                    })
                    .collect::<SimResult<Vec<_>>>()
            };
            match &self.pool {
                Some(pool) => pool.install(work),
                None => work(),
            }
        }
    }

    /// Apply a single agent's intents during the sequential write phase.
    fn apply_intents<O: SimObserver>(
        &mut self,
        agent:    AgentId,
        intents:  Vec<Intent>,
        now:      Tick,
        stats:    &mut StepStats,
        observer: &mut O,
    ) -> SimResult<()> {
        for intent in intents {
            match intent {
                Intent::ChangeVolume(dv) => self.registry.change_volume(agent, dv)?,

                Intent::Translate(v) => self.registry.translate(agent, v)?,

                Intent::Divide => {
                    let daughter =
                        self.registry.divide(agent, self.split_rule.as_ref(), &mut self.rng)?;
                    stats.divisions += 1;
                    trace!("{now}: {agent} divided, daughter {daughter}");
                    observer.on_division(now, agent, daughter);
                }

                Intent::Remove => {
                    self.registry.remove(agent)?;
                    stats.removals += 1;
                    trace!("{now}: {agent} removed");
                    observer.on_removal(now, agent);
                    break;
                }
            }
        }
        Ok(())
    }
}

/// Walk the snapshot in id order on the calling thread.
fn sequential_intents(
    snapshot: &[AgentId],
    store:    &AgentStore,
    modules:  &mut AgentModules,
    ctx:      &StepContext<'_>,
) -> SimResult<Vec<(AgentId, Vec<Intent>)>> {
    let mut out = Vec::with_capacity(snapshot.len());
    for &agent in snapshot {
        if !store.alive[agent.index()] {
            continue;
        }
        let intents = run_modules(store.view(agent), modules.get_mut(agent), ctx)?;
        out.push((agent, intents));
    }
    Ok(out)
}

/// Run one agent's modules in attachment order, stopping after a `Remove`.
fn run_modules(
    view:     CellView,
    attached: &mut [AttachedModule],
    ctx:      &StepContext<'_>,
) -> SimResult<Vec<Intent>> {
    let mut out = Vec::new();
    for m in attached.iter_mut() {
        let intents = m
            .module
            .run(&view, ctx, &mut m.rng)
            .map_err(|source| SimError::Behavior { agent: view.id, source })?;
        let removed = intents.contains(&Intent::Remove);
        out.extend(intents);
        if removed {
            break;
        }
    }
    Ok(out)
}
