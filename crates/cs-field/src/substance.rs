//! Substance definitions.

use cs_core::SubstanceId;

use crate::{FieldError, FieldResult};

/// Parameters of one diffusible substance.
///
/// Mirrors the host framework's `DefineSubstance(id, name, diffusion,
/// decay, resolution)` call.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubstanceSpec {
    pub id:         SubstanceId,
    pub name:       String,
    /// Diffusion coefficient (length² per model time unit).  0 = static.
    pub diffusion:  f64,
    /// First-order decay constant (per model time unit).  0 = stable.
    pub decay:      f64,
    /// Number of voxels along each axis of the cubic domain.
    pub resolution: u32,
}

impl SubstanceSpec {
    pub fn new(
        id:         SubstanceId,
        name:       impl Into<String>,
        diffusion:  f64,
        decay:      f64,
        resolution: u32,
    ) -> Self {
        Self { id, name: name.into(), diffusion, decay, resolution }
    }

    /// Reject malformed substance parameters.
    pub fn validate(&self) -> FieldResult<()> {
        if self.id == SubstanceId::INVALID {
            return Err(FieldError::Config("substance id is the INVALID sentinel".into()));
        }
        if self.name.trim().is_empty() {
            return Err(FieldError::Config(format!("substance {} has an empty name", self.id)));
        }
        if !(self.diffusion.is_finite() && self.diffusion >= 0.0) {
            return Err(FieldError::Config(format!(
                "substance {:?}: diffusion coefficient must be finite and >= 0, got {}",
                self.name, self.diffusion
            )));
        }
        if !(self.decay.is_finite() && self.decay >= 0.0) {
            return Err(FieldError::Config(format!(
                "substance {:?}: decay constant must be finite and >= 0, got {}",
                self.name, self.decay
            )));
        }
        if self.resolution == 0 {
            return Err(FieldError::Config(format!(
                "substance {:?}: resolution must be at least 1",
                self.name
            )));
        }
        Ok(())
    }
}
