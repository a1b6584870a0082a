//! Integration tests for cs-sim.

use cs_agent::AgentRegistry;
use cs_behavior::{
    BehaviorModule, BehaviorResult, CellView, ConstrainedGrowthModule, CopyEvent, DoseResponse,
    DrugResponseModule, GrowthModule, Intent, StepContext,
};
use cs_core::{AgentId, Axis, Bounds, ModuleRng, Point3, SimConfig, SimRng, SubstanceId, Tick};
use cs_field::{
    ConcentrationField, FieldResult, FieldSolver, LinearGradient, NoField, SubstanceRegistry,
    SubstanceSpec,
};

use crate::{NoopObserver, SchedulerState, SimBuilder, SimError, SimObserver, StepStats};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(seed: u64) -> SimConfig {
    SimConfig {
        seed,
        num_threads: Some(1),
        output_interval_ticks: 0,
        ..SimConfig::default()
    }
}

fn growth() -> Vec<Box<dyn BehaviorModule>> {
    vec![Box::new(GrowthModule::new())]
}

/// Every (position, diameter, alive) triple in id order.
fn fingerprint(reg: &AgentRegistry) -> Vec<(Point3, f64, bool)> {
    reg.store
        .agent_ids()
        .map(|a| {
            let i = a.index();
            (reg.store.position[i], reg.store.diameter[i], reg.store.alive[i])
        })
        .collect()
}

/// Records every hook call.
#[derive(Default)]
struct Recorder {
    starts:    Vec<Tick>,
    ends:      Vec<(Tick, StepStats)>,
    divisions: Vec<(AgentId, AgentId)>,
    removals:  Vec<AgentId>,
    snapshots: Vec<Tick>,
    sim_ends:  usize,
}

impl SimObserver for Recorder {
    fn on_step_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }
    fn on_division(&mut self, _tick: Tick, mother: AgentId, daughter: AgentId) {
        self.divisions.push((mother, daughter));
    }
    fn on_removal(&mut self, _tick: Tick, agent: AgentId) {
        self.removals.push(agent);
    }
    fn on_step_end(&mut self, tick: Tick, stats: &StepStats, _registry: &AgentRegistry) {
        self.ends.push((tick, *stats));
    }
    fn on_snapshot(&mut self, tick: Tick, _registry: &AgentRegistry) {
        self.snapshots.push(tick);
    }
    fn on_sim_end(&mut self, _final_tick: Tick) {
        self.sim_ends += 1;
    }
}

/// Returns `Remove` followed by a growth request that must never be applied.
struct RemoveThenGrow;

impl BehaviorModule for RemoveThenGrow {
    fn name(&self) -> &'static str {
        "remove-then-grow"
    }
    fn steps(&self) -> u64 {
        0
    }
    fn run(&mut self, _: &CellView, _: &StepContext<'_>, _: &mut ModuleRng) -> BehaviorResult<Vec<Intent>> {
        Ok(vec![Intent::Remove, Intent::ChangeVolume(1.0)])
    }
    fn replicate(&self, _event: CopyEvent) -> Box<dyn BehaviorModule> {
        Box::new(RemoveThenGrow)
    }
}

/// Counts its own invocations.
struct Counter(u64);

impl BehaviorModule for Counter {
    fn name(&self) -> &'static str {
        "counter"
    }
    fn steps(&self) -> u64 {
        self.0
    }
    fn run(&mut self, _: &CellView, _: &StepContext<'_>, _: &mut ModuleRng) -> BehaviorResult<Vec<Intent>> {
        self.0 += 1;
        Ok(Vec::new())
    }
    fn replicate(&self, _event: CopyEvent) -> Box<dyn BehaviorModule> {
        Box::new(Counter(0))
    }
}

/// Field with no substances that logs every `advance` call.
#[derive(Default)]
struct StepLog(Vec<f64>);

impl ConcentrationField for StepLog {
    fn concentration(&self, substance: SubstanceId, at: Point3) -> FieldResult<f64> {
        NoField.concentration(substance, at)
    }
}

impl FieldSolver for StepLog {
    fn advance(&mut self, dt: f64) -> FieldResult<()> {
        self.0.push(dt);
        Ok(())
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_idle_with_initial_agents() {
        let sim = SimBuilder::new(test_config(1), NoField)
            .add_agent(Point3::ORIGIN, 6.0, growth())
            .add_agent(Point3::ORIGIN, 6.0, growth())
            .build()
            .unwrap();
        assert_eq!(sim.state(), SchedulerState::Idle);
        assert_eq!(sim.live_count(), 2);
        assert_eq!(sim.registry().snapshot_live_ids(), &[AgentId(0), AgentId(1)]);
        assert_eq!(sim.now(), Tick::ZERO);
    }

    #[test]
    fn invalid_time_step_rejected() {
        let config = SimConfig { time_step: 0.0, ..test_config(1) };
        let result = SimBuilder::new(config, NoField).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn invalid_initial_diameter_rejected() {
        let result = SimBuilder::new(test_config(1), NoField)
            .add_agent(Point3::ORIGIN, -1.0, growth())
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn initial_positions_clamped_to_bounds() {
        let config = SimConfig { bounds: Some(Bounds::new(0.0, 300.0).unwrap()), ..test_config(1) };
        let sim = SimBuilder::new(config, NoField)
            .add_agent(Point3::new(-5.0, 150.0, 400.0), 6.0, growth())
            .build()
            .unwrap();
        assert_eq!(sim.registry().store.position[0], Point3::new(0.0, 150.0, 300.0));
    }
}

// ── Growth scenarios ──────────────────────────────────────────────────────────

#[cfg(test)]
mod growth_tests {
    use super::*;

    fn single_cell() -> crate::Sim<NoField> {
        let config = SimConfig { bounds: Some(Bounds::new(0.0, 300.0).unwrap()), ..test_config(7) };
        SimBuilder::new(config, NoField)
            .add_agent(Point3::new(150.0, 150.0, 150.0), 6.0, growth())
            .build()
            .unwrap()
    }

    #[test]
    fn one_step_grows_and_migrates() {
        let mut sim = single_cell();
        let start = sim.registry().store.position[0];
        sim.simulate(1, &mut NoopObserver).unwrap();

        assert_eq!(sim.live_count(), 1);
        assert!(sim.registry().store.diameter[0] > 6.0);
        let moved = sim.registry().store.position[0] - start;
        for c in [moved.x, moved.y, moved.z] {
            assert!((-2.0..=2.0).contains(&c), "migration component {c}");
        }
    }

    #[test]
    fn divides_on_the_step_after_reaching_threshold() {
        let mut sim = single_cell();
        let mut steps = 0;
        while sim.registry().store.diameter[0] < 8.0 {
            sim.simulate(1, &mut NoopObserver).unwrap();
            assert_eq!(sim.live_count(), 1);
            steps += 1;
            assert!(steps < 1_000, "cell never reached the division threshold");
        }
        sim.simulate(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.live_count(), 2);
        assert!(sim.registry().is_alive(AgentId(0)));
    }

    #[test]
    fn daughters_are_not_visited_in_their_birth_step() {
        let mut sim = SimBuilder::new(test_config(3), NoField)
            .add_agent(Point3::ORIGIN, 8.0, growth())
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.simulate(2, &mut rec).unwrap();

        let (_, first) = rec.ends[0];
        assert_eq!((first.visited, first.divisions, first.live), (1, 1, 2));
        let (_, second) = rec.ends[1];
        assert_eq!(second.visited, 2);
    }

    #[test]
    fn chained_runs_equal_one_long_run() {
        let build = || {
            SimBuilder::new(test_config(99), NoField)
                .add_agent(Point3::ORIGIN, 7.0, growth())
                .add_agent(Point3::new(20.0, 0.0, 0.0), 7.9, growth())
                .build()
                .unwrap()
        };
        let mut long = build();
        long.simulate(120, &mut NoopObserver).unwrap();

        let mut chained = build();
        for _ in 0..4 {
            chained.simulate(30, &mut NoopObserver).unwrap();
        }

        assert_eq!(long.now(), chained.now());
        assert!(long.live_count() > 2);
        assert_eq!(fingerprint(long.registry()), fingerprint(chained.registry()));
    }
}

// ── Constrained growth scenario ───────────────────────────────────────────────

#[cfg(test)]
mod constrained_tests {
    use super::*;

    fn run(seed: u64) -> (usize, Vec<Option<bool>>) {
        let mut sim = SimBuilder::new(test_config(seed), NoField)
            .add_agent(Point3::ORIGIN, 6.35, vec![Box::new(ConstrainedGrowthModule::new(true))])
            .build()
            .unwrap();
        sim.simulate(500, &mut NoopObserver).unwrap();
        let reg = sim.registry();
        let flags = reg.live_ids().map(|a| reg.can_divide(a).unwrap()).collect();
        (sim.live_count(), flags)
    }

    #[test]
    fn five_hundred_steps_are_reproducible() {
        let (count_a, flags_a) = run(2024);
        let (count_b, flags_b) = run(2024);
        assert_eq!(count_a, count_b);
        assert_eq!(flags_a, flags_b);
        assert!(count_a > 1);
    }

    #[test]
    fn stopped_cells_stay_stopped() {
        let mut sim = SimBuilder::new(test_config(5), NoField)
            .add_agent(Point3::ORIGIN, 6.35, vec![Box::new(ConstrainedGrowthModule::new(true))])
            .build()
            .unwrap();
        let mut stopped: Vec<AgentId> = Vec::new();
        for _ in 0..300 {
            sim.simulate(1, &mut NoopObserver).unwrap();
            let reg = sim.registry();
            for &a in &stopped {
                assert_eq!(reg.can_divide(a).unwrap(), Some(false), "{a} became capable again");
            }
            stopped = reg
                .live_ids()
                .filter(|&a| reg.can_divide(a).unwrap() == Some(false))
                .collect();
        }
    }
}

// ── Drug response scenario ────────────────────────────────────────────────────

#[cfg(test)]
mod drug_tests {
    use super::*;

    const DRUG: SubstanceId = SubstanceId(0);

    fn drug_sim(seed: u64) -> crate::Sim<SubstanceRegistry> {
        let bounds = Bounds::new(-150.0, 150.0).unwrap();
        let mut field = SubstanceRegistry::new(bounds);
        field
            .define_substance(SubstanceSpec::new(DRUG, "drug", 0.0, 0.0, 20))
            .unwrap();
        let profile = LinearGradient::new(500.0, 495.0, 0.0, 100.0, Axis::Z).unwrap();
        field.initialize_substance(DRUG, "drug", &profile).unwrap();

        let mut placement = SimRng::new(seed);
        let mut builder = SimBuilder::new(SimConfig { bounds: Some(bounds), ..test_config(seed) }, field);
        for _ in 0..10 {
            let at = placement.point_in_cube(-150.0, 150.0);
            builder.push_agent(
                at,
                7.5,
                vec![Box::new(DrugResponseModule::new(DRUG, DoseResponse::five_fu()))],
            );
        }
        builder.build().unwrap()
    }

    fn counts(seed: u64) -> (usize, usize, usize) {
        let mut sim = drug_sim(seed);
        let initial = sim.live_count();
        sim.simulate(24, &mut NoopObserver).unwrap();
        let after_24 = sim.live_count();
        sim.simulate(48, &mut NoopObserver).unwrap();
        (initial, after_24, sim.live_count())
    }

    #[test]
    fn population_is_non_increasing_and_deterministic() {
        let (initial, after_24, after_72) = counts(17);
        assert_eq!(initial, 10);
        assert!(after_24 <= initial);
        assert!(after_72 <= after_24);
        assert_eq!(counts(17), (initial, after_24, after_72));
    }

    #[test]
    fn removals_reported_to_observer() {
        let mut sim = drug_sim(3);
        let mut rec = Recorder::default();
        sim.simulate(72, &mut rec).unwrap();
        assert_eq!(rec.removals.len(), 10 - sim.live_count());
        assert!(rec.divisions.is_empty());
        let total: usize = rec.ends.iter().map(|(_, s)| s.removals).sum();
        assert_eq!(total, rec.removals.len());
    }

    #[test]
    fn undefined_substance_aborts_and_returns_to_idle() {
        let mut sim = SimBuilder::new(test_config(1), NoField)
            .add_agent(
                Point3::ORIGIN,
                7.5,
                vec![Box::new(DrugResponseModule::new(DRUG, DoseResponse::irinotecan()))],
            )
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        let err = sim.simulate(5, &mut rec).unwrap_err();
        assert!(matches!(err, SimError::Behavior { agent: AgentId(0), .. }));
        assert_eq!(sim.state(), SchedulerState::Idle);
        assert_eq!(rec.sim_ends, 0);
        assert_eq!(sim.now(), Tick::ZERO);
    }
}

// ── Step loop mechanics ───────────────────────────────────────────────────────

#[cfg(test)]
mod loop_tests {
    use super::*;

    #[test]
    fn observer_hooks_fire_per_step() {
        let config = SimConfig { output_interval_ticks: 2, ..test_config(1) };
        let mut sim = SimBuilder::new(config, NoField)
            .add_agent(Point3::ORIGIN, 6.0, growth())
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.simulate(5, &mut rec).unwrap();

        assert_eq!(rec.starts, (0..5).map(Tick).collect::<Vec<_>>());
        assert_eq!(rec.ends.len(), 5);
        assert_eq!(rec.snapshots, vec![Tick(0), Tick(2), Tick(4)]);
        assert_eq!(rec.sim_ends, 1);
        assert_eq!(sim.state(), SchedulerState::Idle);
    }

    #[test]
    fn field_advances_in_substeps() {
        let config = SimConfig { field_substeps: 4, ..test_config(1) };
        let mut sim = SimBuilder::new(config, StepLog::default()).build().unwrap();
        sim.simulate(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.field().0.len(), 12);
        assert!(sim.field().0.iter().all(|&dt| (dt - 0.0025).abs() < 1e-15));
    }

    #[test]
    fn remove_stops_the_agent_for_the_step() {
        let mut sim = SimBuilder::new(test_config(1), NoField)
            .add_agent(Point3::ORIGIN, 6.0, vec![Box::new(RemoveThenGrow), Box::new(Counter(0))])
            .add_agent(Point3::ORIGIN, 6.0, vec![Box::new(Counter(0))])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.simulate(3, &mut rec).unwrap();

        assert_eq!(rec.removals, vec![AgentId(0)]);
        assert!(!sim.registry().is_alive(AgentId(0)));
        assert_eq!(sim.registry().store.diameter[0], 6.0);
        assert_eq!(sim.registry().modules.get(AgentId(1))[0].module.steps(), 3);
        assert_eq!(rec.ends[1].1.visited, 1);
    }

    #[test]
    fn host_inserted_agents_join_the_next_run() {
        let mut sim = SimBuilder::new(test_config(1), NoField)
            .add_agent(Point3::ORIGIN, 6.0, vec![Box::new(Counter(0))])
            .build()
            .unwrap();
        sim.simulate(1, &mut NoopObserver).unwrap();
        let added = sim
            .registry_mut()
            .insert(Point3::ORIGIN, 6.0, vec![Box::new(Counter(0))])
            .unwrap();
        sim.simulate(2, &mut NoopObserver).unwrap();
        assert_eq!(sim.registry().modules.get(added)[0].module.steps(), 2);
        assert_eq!(sim.registry().modules.get(AgentId(0))[0].module.steps(), 3);
    }
}

// ── Parallel intent phase ─────────────────────────────────────────────────────

#[cfg(all(test, feature = "parallel"))]
mod parallel_tests {
    use super::*;

    fn population(num_threads: Option<usize>) -> crate::Sim<NoField> {
        let config = SimConfig {
            num_threads,
            bounds: Some(Bounds::new(0.0, 300.0).unwrap()),
            ..test_config(4357)
        };
        let mut placement = SimRng::new(11);
        let mut builder = SimBuilder::new(config, NoField);
        for i in 0..50 {
            let modules: Vec<Box<dyn BehaviorModule>> = if i % 2 == 0 {
                vec![Box::new(ConstrainedGrowthModule::new(true))]
            } else {
                growth()
            };
            builder.push_agent(placement.point_in_cube(0.0, 300.0), 6.35, modules);
        }
        builder.build().unwrap()
    }

    fn run(num_threads: Option<usize>) -> crate::Sim<NoField> {
        let mut sim = population(num_threads);
        sim.simulate(120, &mut NoopObserver).unwrap();
        sim
    }

    #[test]
    fn thread_count_does_not_change_results() {
        // Some(1) walks the snapshot on the calling thread.
        let sequential = run(Some(1));
        let four = run(Some(4));
        let global = run(None);

        assert!(sequential.live_count() > 50);
        assert_eq!(four.live_count(), sequential.live_count());
        assert_eq!(global.live_count(), sequential.live_count());
        assert_eq!(fingerprint(four.registry()), fingerprint(sequential.registry()));
        assert_eq!(fingerprint(global.registry()), fingerprint(sequential.registry()));
    }

    #[test]
    fn parallel_chained_runs_equal_one_long_run() {
        let long = run(Some(4));
        let mut chained = population(Some(4));
        for _ in 0..4 {
            chained.simulate(30, &mut NoopObserver).unwrap();
        }
        assert_eq!(fingerprint(chained.registry()), fingerprint(long.registry()));
    }

    #[test]
    fn parallel_errors_abort_the_step() {
        let config = SimConfig { num_threads: Some(4), ..test_config(1) };
        let mut builder = SimBuilder::new(config, NoField);
        for _ in 0..8 {
            builder.push_agent(Point3::ORIGIN, 6.0, growth());
        }
        builder.push_agent(
            Point3::ORIGIN,
            7.5,
            vec![Box::new(DrugResponseModule::new(SubstanceId(0), DoseResponse::irinotecan()))],
        );
        let mut sim = builder.build().unwrap();
        let err = sim.simulate(3, &mut NoopObserver).unwrap_err();
        assert!(matches!(err, SimError::Behavior { agent: AgentId(8), .. }));
        assert_eq!(sim.state(), SchedulerState::Idle);
    }
}
