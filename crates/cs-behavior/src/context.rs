//! Read-only inputs passed to every behavior module invocation.

use cs_core::{AgentId, Point3, SubstanceId, Tick};
use cs_field::ConcentrationField;

use crate::BehaviorResult;

/// The owning agent as seen by its modules: a copy of its physical state
/// taken from the snapshot at the start of the step.
///
/// This is the module's only back-reference to the agent; modules never
/// hold agents.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellView {
    pub id:       AgentId,
    pub position: Point3,
    pub diameter: f64,
}

/// Step-wide state shared (immutably) by all module invocations.
///
/// Built once per step by cs-sim.  The field borrow lives for the intent
/// phase only; the scheduler never advances the field while a context is
/// live.
pub struct StepContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    /// Model time per tick; growth rates are multiplied by it.
    pub time_step: f64,

    /// The substance field, already advanced for this step.
    pub field: &'a dyn ConcentrationField,
}

impl<'a> StepContext<'a> {
    #[inline]
    pub fn new(tick: Tick, time_step: f64, field: &'a dyn ConcentrationField) -> Self {
        Self { tick, time_step, field }
    }

    /// Concentration of `substance` at `at`.
    #[inline]
    pub fn concentration(&self, substance: SubstanceId, at: Point3) -> BehaviorResult<f64> {
        Ok(self.field.concentration(substance, at)?)
    }
}
