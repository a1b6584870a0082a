//! Constrained growth: division succeeds with a fixed probability and a
//! failed (or forbidden) division stops the lineage member for good.

use cs_core::ModuleRng;

use crate::{BehaviorModule, BehaviorResult, CellView, CopyEvent, Intent, StepContext};

/// Tunables for [`ConstrainedGrowthModule`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstrainedGrowthParams {
    /// Cells at or above this diameter attempt division instead of growing.
    pub division_diameter: f64,
    /// Volume added per unit of model time.
    pub growth_rate: f64,
    /// A division roll must exceed this to succeed (0.1 → 90 % success).
    pub failure_threshold: f64,
}

impl Default for ConstrainedGrowthParams {
    fn default() -> Self {
        Self {
            division_diameter: 8.0,
            growth_rate:       400.0,
            failure_threshold: 0.1,
        }
    }
}

/// Grows the agent below the threshold; at the threshold rolls once per step
/// and divides only if the agent is still division-capable and the roll
/// succeeds.  Otherwise `can_divide` drops to `false` and never comes back.
#[derive(Clone, Debug)]
pub struct ConstrainedGrowthModule {
    params:     ConstrainedGrowthParams,
    can_divide: bool,
    steps:      u64,
}

impl ConstrainedGrowthModule {
    /// Initial value of the step counter.
    pub const FIRST_STEP: u64 = 1;

    pub fn new(can_divide: bool) -> Self {
        Self::with_params(ConstrainedGrowthParams::default(), can_divide)
    }

    pub fn with_params(params: ConstrainedGrowthParams, can_divide: bool) -> Self {
        Self { params, can_divide, steps: Self::FIRST_STEP }
    }

    pub fn params(&self) -> &ConstrainedGrowthParams {
        &self.params
    }
}

impl BehaviorModule for ConstrainedGrowthModule {
    fn name(&self) -> &'static str {
        "constrained-growth"
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
        let mut intents = Vec::new();
        if cell.diameter < p.division_diameter {
            intents.push(Intent::ChangeVolume(p.growth_rate * ctx.time_step));
        } else {
            let roll = rng.uniform(0.0, 1.0);
            if self.can_divide && roll > p.failure_threshold {
                intents.push(Intent::Divide);
            } else {
                self.can_divide = false;
            }
        }
        self.steps += 1;
        Ok(intents)
    }

    /// A division daughter is always division-capable; any other copy
    /// inherits the current flag.  The counter restarts either way.
    fn replicate(&self, event: CopyEvent) -> Box<dyn BehaviorModule> {
        let can_divide = match event {
            CopyEvent::CellDivision => true,
            CopyEvent::Duplicate => self.can_divide,
        };
        Box::new(Self::with_params(self.params, can_divide))
    }

    /// Being the source of a division marks the mother division-capable.
    fn on_copied(&mut self, event: CopyEvent) {
        if event == CopyEvent::CellDivision {
            self.can_divide = true;
        }
    }

    fn can_divide(&self) -> Option<bool> {
        Some(self.can_divide)
    }

    fn set_can_divide(&mut self, can_divide: bool) -> bool {
        self.can_divide = can_divide;
        true
    }
}
