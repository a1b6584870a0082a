//! Unconstrained growth: grow and wander until large enough, then divide.

use cs_core::{ModuleRng, Point3};

use crate::{BehaviorModule, BehaviorResult, CellView, CopyEvent, Intent, StepContext};

/// Tunables for [`GrowthModule`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrowthParams {
    /// Cells at or above this diameter divide instead of growing.
    pub division_diameter: f64,
    /// Volume added per unit of model time.
    pub growth_rate: f64,
    /// Half-width of the per-axis uniform migration step.
    pub migration: f64,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            division_diameter: 8.0,
            growth_rate:       400.0,
            migration:         2.0,
        }
    }
}

/// Grows the agent (with a random migration step) while its diameter is
/// below the threshold; divides it once the threshold is reached.
///
/// Division is a pure size gate: no probability is involved.
#[derive(Clone, Debug, Default)]
pub struct GrowthModule {
    params: GrowthParams,
    steps:  u64,
}

impl GrowthModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: GrowthParams) -> Self {
        Self { params, steps: 0 }
    }

    pub fn params(&self) -> &GrowthParams {
        &self.params
    }
}

impl BehaviorModule for GrowthModule {
    fn name(&self) -> &'static str {
        "growth"
    }

    fn steps(&self) -> u64 {
        self.steps
    }

    fn run(
        &mut self,
        cell: &CellView,
        ctx:  &StepContext<'_>,
        rng:  &mut ModuleRng,
    ) -> BehaviorResult<Vec<Intent>> {
        let p = self.params;
        let intents = if cell.diameter < p.division_diameter {
            let shift = Point3::new(
                rng.uniform(-p.migration, p.migration),
                rng.uniform(-p.migration, p.migration),
                rng.uniform(-p.migration, p.migration),
            );
            vec![
                Intent::ChangeVolume(p.growth_rate * ctx.time_step),
                Intent::Translate(shift),
            ]
        } else {
            vec![Intent::Divide]
        };
        self.steps += 1;
        Ok(intents)
    }

    /// Daughters keep the parameters and restart the step counter.
    fn replicate(&self, _event: CopyEvent) -> Box<dyn BehaviorModule> {
        Box::new(Self::with_params(self.params))
    }
}
