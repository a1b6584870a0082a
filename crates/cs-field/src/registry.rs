//! `SubstanceRegistry` — the reference [`FieldSolver`].

use std::collections::BTreeMap;

use log::debug;

use cs_core::{Bounds, Point3, SubstanceId};

use crate::{
    ConcentrationField, DiffusionGrid, FieldError, FieldResult, FieldSolver, Profile,
    SubstanceSpec,
};

/// All substances of a run, each on its own [`DiffusionGrid`] over a shared
/// cubic domain.
///
/// Substances are kept in id order so `advance` touches them
/// deterministically.
pub struct SubstanceRegistry {
    bounds: Bounds,
    grids:  BTreeMap<SubstanceId, DiffusionGrid>,
}

impl SubstanceRegistry {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds, grids: BTreeMap::new() }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Define a new substance.  Its concentration is zero everywhere until
    /// [`initialize_substance`](Self::initialize_substance) is called.
    pub fn define_substance(&mut self, spec: SubstanceSpec) -> FieldResult<()> {
        if self.grids.contains_key(&spec.id) {
            return Err(FieldError::Config(format!("substance {} is already defined", spec.id)));
        }
        debug!(
            "defining substance {} {:?}: D={} decay={} resolution={}",
            spec.id, spec.name, spec.diffusion, spec.decay, spec.resolution
        );
        let id = spec.id;
        let grid = DiffusionGrid::new(spec, self.bounds)?;
        self.grids.insert(id, grid);
        Ok(())
    }

    /// Fill substance `id` from `profile`.
    ///
    /// `name` must match the name the substance was defined with, so a
    /// mistyped id can't silently initialize the wrong substance.
    pub fn initialize_substance<P: Profile + ?Sized>(
        &mut self,
        id:      SubstanceId,
        name:    &str,
        profile: &P,
    ) -> FieldResult<()> {
        let grid = self.grids.get_mut(&id).ok_or(FieldError::UndefinedSubstance(id))?;
        if grid.spec().name != name {
            return Err(FieldError::NameMismatch {
                id,
                defined:   grid.spec().name.clone(),
                requested: name.to_owned(),
            });
        }
        grid.initialize(profile);
        debug!("initialized substance {id} {name:?}");
        Ok(())
    }

    pub fn grid(&self, id: SubstanceId) -> Option<&DiffusionGrid> {
        self.grids.get(&id)
    }

    /// Number of defined substances.
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}

impl ConcentrationField for SubstanceRegistry {
    fn concentration(&self, substance: SubstanceId, at: Point3) -> FieldResult<f64> {
        self.grids
            .get(&substance)
            .map(|grid| grid.concentration(at))
            .ok_or(FieldError::UndefinedSubstance(substance))
    }
}

impl FieldSolver for SubstanceRegistry {
    fn advance(&mut self, dt: f64) -> FieldResult<()> {
        for grid in self.grids.values_mut() {
            grid.advance(dt)?;
        }
        Ok(())
    }
}
