//! `DiffusionGrid` — one substance sampled on a cubic voxel grid.
//!
//! # Scheme
//!
//! Values live at voxel centres.  `advance(dt)` takes one explicit
//! forward-Euler step of
//!
//! ```text
//! ∂c/∂t = D ∇²c − μ c
//! ```
//!
//! using the 7-point Laplacian with zero-flux (closed) boundaries.  The
//! explicit step is stable for `D · dt / h² ≤ 1/6` and keeps concentrations
//! non-negative only while `μ · dt ≤ 1`; steps outside either limit are
//! rejected.  A point query returns the
//! value of the voxel containing the point; points outside the domain read
//! the nearest boundary voxel.

use cs_core::{Bounds, Point3};

use crate::{FieldError, FieldResult, Profile, SubstanceSpec};

/// Largest `D · dt / h²` the explicit scheme tolerates.
const STABILITY_LIMIT: f64 = 1.0 / 6.0;

pub struct DiffusionGrid {
    spec:       SubstanceSpec,
    bounds:     Bounds,
    /// Voxels per axis.
    res:        usize,
    /// Voxel edge length.
    box_length: f64,
    values:     Vec<f64>,
    /// Reused output buffer for `advance`.
    scratch:    Vec<f64>,
}

impl DiffusionGrid {
    /// Allocate a zero-filled grid for `spec` over `bounds`.
    pub fn new(spec: SubstanceSpec, bounds: Bounds) -> FieldResult<Self> {
        spec.validate()?;
        let res = spec.resolution as usize;
        let len = res
            .checked_mul(res)
            .and_then(|n| n.checked_mul(res))
            .ok_or_else(|| FieldError::Config(format!("resolution {res} is too large")))?;
        Ok(Self {
            box_length: bounds.extent() / res as f64,
            spec,
            bounds,
            res,
            values: vec![0.0; len],
            scratch: vec![0.0; len],
        })
    }

    pub fn spec(&self) -> &SubstanceSpec {
        &self.spec
    }

    pub fn resolution(&self) -> usize {
        self.res
    }

    pub fn box_length(&self) -> f64 {
        self.box_length
    }

    /// Raw voxel values, x fastest.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    fn index(&self, ix: usize, iy: usize, iz: usize) -> usize {
        (iz * self.res + iy) * self.res + ix
    }

    /// Voxel coordinate of `c` along one axis, clamped into the grid.
    #[inline]
    fn cell_of(&self, c: f64) -> usize {
        let i = ((c - self.bounds.min) / self.box_length).floor();
        if i.is_nan() || i < 0.0 {
            0
        } else {
            (i as usize).min(self.res - 1)
        }
    }

    #[inline]
    fn centre(&self, i: usize) -> f64 {
        self.bounds.min + (i as f64 + 0.5) * self.box_length
    }

    /// Set every voxel to `profile` evaluated at the voxel centre.
    pub fn initialize<P: Profile + ?Sized>(&mut self, profile: &P) {
        for iz in 0..self.res {
            for iy in 0..self.res {
                for ix in 0..self.res {
                    let p = Point3::new(self.centre(ix), self.centre(iy), self.centre(iz));
                    let idx = self.index(ix, iy, iz);
                    self.values[idx] = profile.value_at(p);
                }
            }
        }
    }

    /// Value of the voxel containing `at`.
    pub fn concentration(&self, at: Point3) -> f64 {
        let idx = self.index(self.cell_of(at.x), self.cell_of(at.y), self.cell_of(at.z));
        self.values[idx]
    }

    /// One explicit diffusion-decay step of `dt` model time.
    pub fn advance(&mut self, dt: f64) -> FieldResult<()> {
        let d = self.spec.diffusion;
        let mu = self.spec.decay;
        if d == 0.0 && mu == 0.0 {
            return Ok(());
        }

        let alpha = d * dt / (self.box_length * self.box_length);
        if alpha > STABILITY_LIMIT {
            return Err(FieldError::Config(format!(
                "substance {:?}: D·dt/h² = {alpha:.4} exceeds the explicit stability limit {STABILITY_LIMIT:.4}; \
                 lower the time step or the resolution",
                self.spec.name
            )));
        }

        if mu * dt > 1.0 {
            return Err(FieldError::Config(format!(
                "substance {:?}: decay·dt = {:.4} exceeds 1 and would drive concentrations negative; \
                 lower the time step or the decay constant",
                self.spec.name,
                mu * dt
            )));
        }

        let res = self.res;
        let last = res - 1;
        for iz in 0..res {
            for iy in 0..res {
                for ix in 0..res {
                    let idx = self.index(ix, iy, iz);
                    let c = self.values[idx];
                    // Closed boundary: a missing neighbour mirrors the voxel itself.
                    let at = |x: usize, y: usize, z: usize| self.values[self.index(x, y, z)];
                    let xm = if ix > 0 { at(ix - 1, iy, iz) } else { c };
                    let xp = if ix < last { at(ix + 1, iy, iz) } else { c };
                    let ym = if iy > 0 { at(ix, iy - 1, iz) } else { c };
                    let yp = if iy < last { at(ix, iy + 1, iz) } else { c };
                    let zm = if iz > 0 { at(ix, iy, iz - 1) } else { c };
                    let zp = if iz < last { at(ix, iy, iz + 1) } else { c };
                    let laplacian = xm + xp + ym + yp + zm + zp - 6.0 * c;
                    self.scratch[idx] = c + alpha * laplacian - mu * dt * c;
                }
            }
        }
        std::mem::swap(&mut self.values, &mut self.scratch);
        Ok(())
    }
}
