//! The query and solver traits the scheduler and behavior modules depend on.

use cs_core::{Point3, SubstanceId};

use crate::{FieldError, FieldResult};

/// Read-only, globally addressable scalar fields over the simulation domain.
///
/// During a step the field is shared immutably by every agent update, which
/// may run on several threads, hence the `Send + Sync` bound.
pub trait ConcentrationField: Send + Sync {
    /// Concentration of `substance` at `at`.
    ///
    /// Querying a substance that was never defined is a logic error and
    /// must return [`FieldError::UndefinedSubstance`].
    fn concentration(&self, substance: SubstanceId, at: Point3) -> FieldResult<f64>;
}

/// A field that the scheduler can advance between agent passes.
pub trait FieldSolver: ConcentrationField {
    /// Advance every substance by one field-timestep of `dt` model time.
    fn advance(&mut self, dt: f64) -> FieldResult<()>;
}

/// A [`FieldSolver`] with no substances.
///
/// Useful for populations whose modules never read the field (pure growth
/// experiments).  Every query fails with `UndefinedSubstance`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoField;

impl ConcentrationField for NoField {
    fn concentration(&self, substance: SubstanceId, _at: Point3) -> FieldResult<f64> {
        Err(FieldError::UndefinedSubstance(substance))
    }
}

impl FieldSolver for NoField {
    fn advance(&mut self, _dt: f64) -> FieldResult<()> {
        Ok(())
    }
}
