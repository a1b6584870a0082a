//! Unit tests for cs-agent.

#[cfg(test)]
mod helpers {
    use cs_behavior::{BehaviorModule, ConstrainedGrowthModule, GrowthModule};

    pub fn growth() -> Vec<Box<dyn BehaviorModule>> {
        vec![Box::new(GrowthModule::new())]
    }

    pub fn constrained(can_divide: bool) -> Vec<Box<dyn BehaviorModule>> {
        vec![Box::new(ConstrainedGrowthModule::new(can_divide))]
    }
}

// ── Registry lifecycle ────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use cs_core::{AgentId, Bounds, CoreError, Point3};

    use super::helpers::growth;
    use crate::{AgentRegistry, RegistryBuilder};

    #[test]
    fn ids_are_sequential_and_never_reused() {
        let mut reg = AgentRegistry::new(1, None);
        let a = reg.insert(Point3::ORIGIN, 5.0, growth()).unwrap();
        let b = reg.insert(Point3::ORIGIN, 5.0, growth()).unwrap();
        assert_eq!((a, b), (AgentId(0), AgentId(1)));

        reg.remove(a).unwrap();
        let c = reg.insert(Point3::ORIGIN, 5.0, growth()).unwrap();
        assert_eq!(c, AgentId(2));
        assert_eq!(reg.live_count(), 2);
        assert_eq!(reg.total_created(), 3);
    }

    #[test]
    fn inserted_agents_are_pending_until_compact() {
        let mut reg = RegistryBuilder::new(1)
            .agent(Point3::ORIGIN, 5.0, growth())
            .build()
            .unwrap();
        assert_eq!(reg.snapshot_live_ids(), &[AgentId(0)]);

        let d = reg.insert(Point3::ORIGIN, 5.0, growth()).unwrap();
        assert_eq!(reg.snapshot_live_ids(), &[AgentId(0)]);
        assert_eq!(reg.live_count(), 2);
        assert_eq!(reg.live_ids().collect::<Vec<_>>(), vec![AgentId(0), d]);

        reg.compact();
        assert_eq!(reg.snapshot_live_ids(), &[AgentId(0), d]);
    }

    #[test]
    fn remove_is_immediate_and_final() {
        let mut reg = RegistryBuilder::new(1)
            .agent(Point3::ORIGIN, 5.0, growth())
            .agent(Point3::ORIGIN, 5.0, growth())
            .build()
            .unwrap();
        reg.remove(AgentId(0)).unwrap();

        assert!(!reg.is_alive(AgentId(0)));
        assert!(reg.modules.get(AgentId(0)).is_empty());
        assert_eq!(reg.live_ids().collect::<Vec<_>>(), vec![AgentId(1)]);
        assert!(matches!(reg.remove(AgentId(0)), Err(CoreError::AgentRemoved(_))));
        assert!(matches!(
            reg.change_volume(AgentId(0), 1.0),
            Err(CoreError::AgentRemoved(_))
        ));

        reg.compact();
        assert_eq!(reg.snapshot_live_ids(), &[AgentId(1)]);
    }

    #[test]
    fn unknown_agent_is_not_found() {
        let mut reg = AgentRegistry::new(1, None);
        assert!(matches!(reg.remove(AgentId(9)), Err(CoreError::AgentNotFound(_))));
        assert!(!reg.is_alive(AgentId(9)));
    }

    #[test]
    fn invalid_diameter_rejected() {
        let mut reg = AgentRegistry::new(1, None);
        assert!(matches!(
            reg.insert(Point3::ORIGIN, 0.0, growth()),
            Err(CoreError::Config(_))
        ));
        assert!(reg.insert(Point3::ORIGIN, f64::NAN, growth()).is_err());
        assert_eq!(reg.total_created(), 0);
    }

    #[test]
    fn positions_clamped_to_bounds() {
        let bounds = Bounds::new(-10.0, 10.0).unwrap();
        let mut reg = AgentRegistry::new(1, Some(bounds));
        let a = reg.insert(Point3::new(50.0, 0.0, -50.0), 5.0, growth()).unwrap();
        assert_eq!(reg.store.position[a.index()], Point3::new(10.0, 0.0, -10.0));

        reg.translate(a, Point3::new(-100.0, 3.0, 0.0)).unwrap();
        assert_eq!(reg.store.position[a.index()], Point3::new(-10.0, 3.0, -10.0));
    }
}

// ── Volume / diameter ─────────────────────────────────────────────────────────

#[cfg(test)]
mod volume {
    use cs_core::{CoreError, Point3, sphere_volume};

    use super::helpers::growth;
    use crate::AgentRegistry;

    #[test]
    fn change_volume_updates_diameter() {
        let mut reg = AgentRegistry::new(1, None);
        let a = reg.insert(Point3::ORIGIN, 5.0, growth()).unwrap();
        let v0 = sphere_volume(5.0);
        reg.change_volume(a, 100.0).unwrap();
        let d = reg.store.diameter[a.index()];
        assert!((sphere_volume(d) - (v0 + 100.0)).abs() < 1e-9);
        assert!(d > 5.0);
    }

    #[test]
    fn shrinking_to_nothing_is_an_error() {
        let mut reg = AgentRegistry::new(1, None);
        let a = reg.insert(Point3::ORIGIN, 1.0, growth()).unwrap();
        let err = reg.change_volume(a, -sphere_volume(1.0)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidVolume { .. }));
        assert_eq!(reg.store.diameter[a.index()], 1.0);
    }
}

// ── Division and copies ───────────────────────────────────────────────────────

#[cfg(test)]
mod division {
    use cs_behavior::CopyEvent;
    use cs_core::{AgentId, CoreError, Point3, SimRng, sphere_volume};

    use super::helpers::{constrained, growth};
    use crate::{AgentRegistry, CellState, RegistryBuilder, SplitRule, SymmetricSplit};

    #[test]
    fn symmetric_split_halves_volume_and_keeps_centre() {
        let mut rng = SimRng::new(5);
        let mother = CellState::new(Point3::new(1.0, 2.0, 3.0), 8.0);
        let (a, b) = SymmetricSplit.split(mother, &mut rng);

        assert!((a.volume() - mother.volume() / 2.0).abs() < 1e-9);
        assert_eq!(a.diameter, b.diameter);
        let centre = (a.position + b.position) * 0.5;
        assert!(centre.distance(mother.position) < 1e-12);
        assert!((a.position.distance(b.position) - a.diameter).abs() < 1e-9);
    }

    #[test]
    fn divide_creates_exactly_one_pending_daughter() {
        let mut reg = RegistryBuilder::new(3)
            .agent(Point3::ORIGIN, 8.0, growth())
            .build()
            .unwrap();
        let mut rng = SimRng::new(3);
        let before = sphere_volume(8.0);

        let d = reg.divide(AgentId(0), &SymmetricSplit, &mut rng).unwrap();
        assert_eq!(d, AgentId(1));
        assert_eq!(reg.live_count(), 2);
        assert_eq!(reg.snapshot_live_ids(), &[AgentId(0)]);
        assert_eq!(reg.store.parent[d.index()], AgentId(0));

        let total = sphere_volume(reg.store.diameter[0]) + sphere_volume(reg.store.diameter[1]);
        assert!((total - before).abs() < 1e-9);
        assert_eq!(reg.modules.get(d).len(), 1);
        assert_eq!(reg.modules.get(d)[0].module.steps(), 0);
    }

    #[test]
    fn dividing_a_removed_agent_fails() {
        let mut reg = RegistryBuilder::new(3)
            .agent(Point3::ORIGIN, 8.0, growth())
            .build()
            .unwrap();
        reg.remove(AgentId(0)).unwrap();
        let err = reg
            .divide(AgentId(0), &SymmetricSplit, &mut SimRng::new(0))
            .unwrap_err();
        assert!(matches!(err, CoreError::AgentRemoved(_)));
        assert_eq!(reg.total_created(), 1);
    }

    #[test]
    fn division_copy_policy_for_constrained_modules() {
        let mut reg = RegistryBuilder::new(3)
            .agent(Point3::ORIGIN, 8.0, constrained(false))
            .build()
            .unwrap();
        let mother = AgentId(0);
        let d = reg.divide(mother, &SymmetricSplit, &mut SimRng::new(0)).unwrap();
        assert_eq!(reg.can_divide(d).unwrap(), Some(true));
        assert_eq!(reg.can_divide(mother).unwrap(), Some(true));
    }

    #[test]
    fn duplicate_inherits_flag() {
        let mut reg = AgentRegistry::new(3, None);
        let src = reg.insert(Point3::ORIGIN, 6.0, constrained(false)).unwrap();
        let state = reg.cell_state(src).unwrap();
        let copy = reg.replicate(src, CopyEvent::Duplicate, state).unwrap();
        assert_eq!(reg.can_divide(copy).unwrap(), Some(false));
        assert_eq!(reg.can_divide(src).unwrap(), Some(false));
    }

    #[test]
    fn can_divide_query_and_update() {
        let mut reg = AgentRegistry::new(3, None);
        let g = reg.insert(Point3::ORIGIN, 6.0, growth()).unwrap();
        let c = reg.insert(Point3::ORIGIN, 6.0, constrained(true)).unwrap();
        assert_eq!(reg.can_divide(g).unwrap(), None);
        assert!(!reg.set_can_divide(g, false).unwrap());
        assert!(reg.set_can_divide(c, false).unwrap());
        assert_eq!(reg.can_divide(c).unwrap(), Some(false));
    }

    #[test]
    fn daughter_streams_are_fresh_and_reproducible() {
        let run = || {
            let mut reg = RegistryBuilder::new(11)
                .agent(Point3::ORIGIN, 8.0, growth())
                .build()
                .unwrap();
            let d = reg.divide(AgentId(0), &SymmetricSplit, &mut SimRng::new(11)).unwrap();
            let draw = reg.modules.get_mut(d)[0].rng.uniform(0.0, 1.0);
            (reg.store.position[d.index()], draw)
        };
        assert_eq!(run(), run());
    }
}
