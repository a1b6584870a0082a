//! Drug response: a concentration-derived probability decides each step
//! whether the agent survives, divides, or dies.

use cs_core::{ModuleRng, SubstanceId};

use crate::{BehaviorModule, BehaviorResult, CellView, CopyEvent, Intent, StepContext};

/// Outcome of one dose-response decision.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Fate {
    Survive,
    Divide,
    Die,
}

/// Concentration → survival-probability curve, with its coefficients.
///
/// Both variants are the same three-state machine and differ in the formula
/// and in which side of the probability guards removal:
///
/// - `SaturatingExponential`: `P = exp(offset − slope · ln(c + shift))`.
///   Above `threshold` a sample greater than `P` kills the agent; at or
///   below it a sample less than `P − 1` divides it.
/// - `LogLinear`: `P = 1 − slope · log10(c)`.  When `P > 1` a sample less
///   than `P − 1` divides the agent; otherwise a sample greater than `P`
///   kills it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoseResponse {
    SaturatingExponential {
        offset:    f64,
        slope:     f64,
        shift:     f64,
        threshold: f64,
    },
    LogLinear {
        slope: f64,
    },
}

impl DoseResponse {
    /// 5-fluorouracil coefficients.
    pub fn five_fu() -> Self {
        DoseResponse::SaturatingExponential {
            offset:    8.77735e-4,
            slope:     0.0025,
            shift:     0.32518,
            threshold: 1.09,
        }
    }

    /// Irinotecan coefficients.
    pub fn irinotecan() -> Self {
        DoseResponse::LogLinear { slope: 0.00448 }
    }

    /// Survival probability `P` at concentration `c`.
    ///
    /// Not clamped: values above 1 encode a division propensity of `P − 1`.
    /// For `LogLinear`, `c = 0` gives `+∞`.
    pub fn survival_probability(&self, c: f64) -> f64 {
        match *self {
            DoseResponse::SaturatingExponential { offset, slope, shift, .. } => {
                (offset - slope * (c + shift).ln()).exp()
            }
            DoseResponse::LogLinear { slope } => 1.0 - slope * c.log10(),
        }
    }

    /// Map concentration `c` and one uniform `sample` in `[0, 1)` to a fate.
    pub fn decide(&self, c: f64, sample: f64) -> Fate {
        let p = self.survival_probability(c);
        let removal_branch = match *self {
            DoseResponse::SaturatingExponential { threshold, .. } => c > threshold,
            DoseResponse::LogLinear { .. } => !(p > 1.0),
        };
        if removal_branch {
            if sample > p { Fate::Die } else { Fate::Survive }
        } else if sample < p - 1.0 {
            Fate::Divide
        } else {
            Fate::Survive
        }
    }
}

/// Reads the local concentration of one substance each step and applies a
/// [`DoseResponse`] to it.
#[derive(Clone, Debug)]
pub struct DrugResponseModule {
    substance: SubstanceId,
    response:  DoseResponse,
    hours:     u64,
}

impl DrugResponseModule {
    pub fn new(substance: SubstanceId, response: DoseResponse) -> Self {
        Self { substance, response, hours: 0 }
    }

    pub fn substance(&self) -> SubstanceId {
        self.substance
    }

    pub fn response(&self) -> &DoseResponse {
        &self.response
    }
}

impl BehaviorModule for DrugResponseModule {
    fn name(&self) -> &'static str {
        "drug-response"
    }

    fn steps(&self) -> u64 {
        self.hours
    }

    fn run(
        &mut self,
        cell: &CellView,
        ctx:  &StepContext<'_>,
        rng:  &mut ModuleRng,
    ) -> BehaviorResult<Vec<Intent>> {
        let c = ctx.concentration(self.substance, cell.position)?;
        let sample = rng.uniform(0.0, 1.0);
        let intents = match self.response.decide(c, sample) {
            // A dead agent's counter is never advanced.
            Fate::Die => return Ok(vec![Intent::Remove]),
            Fate::Divide => vec![Intent::Divide],
            Fate::Survive => Vec::new(),
        };
        self.hours += 1;
        Ok(intents)
    }

    fn replicate(&self, _event: CopyEvent) -> Box<dyn BehaviorModule> {
        Box::new(Self::new(self.substance, self.response))
    }
}
