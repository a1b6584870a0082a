//! Initial concentration distributions.
//!
//! A [`Profile`] maps a point to a concentration and is sampled once per
//! voxel centre when a substance is initialized.  Any `Fn(Point3) -> f64`
//! closure is a profile, so hosts can supply arbitrary distributions.

use cs_core::{Axis, Point3};

use crate::{FieldError, FieldResult};

/// A distribution function `(x, y, z) -> concentration`.
pub trait Profile {
    fn value_at(&self, p: Point3) -> f64;
}

impl<F: Fn(Point3) -> f64> Profile for F {
    #[inline]
    fn value_at(&self, p: Point3) -> f64 {
        self(p)
    }
}

/// The same concentration everywhere.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Uniform(pub f64);

impl Profile for Uniform {
    #[inline]
    fn value_at(&self, _p: Point3) -> f64 {
        self.0
    }
}

/// A linear ramp along one axis through `(start_pos, start_value)` and
/// `(end_pos, end_value)`.
///
/// The line is extended outside `[start_pos, end_pos]`, so
/// `value = slope · coord + intercept` everywhere in the domain.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub start_value: f64,
    pub end_value:   f64,
    pub start_pos:   f64,
    pub end_pos:     f64,
    pub axis:        Axis,
    slope:           f64,
    intercept:       f64,
}

impl LinearGradient {
    pub fn new(
        start_value: f64,
        end_value:   f64,
        start_pos:   f64,
        end_pos:     f64,
        axis:        Axis,
    ) -> FieldResult<Self> {
        let all_finite = [start_value, end_value, start_pos, end_pos]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(FieldError::Config("linear gradient parameters must be finite".into()));
        }
        if start_pos == end_pos {
            return Err(FieldError::Config(format!(
                "linear gradient needs distinct start and end positions, both are {start_pos}"
            )));
        }
        let slope = (end_value - start_value) / (end_pos - start_pos);
        let intercept = start_value - slope * start_pos;
        Ok(Self { start_value, end_value, start_pos, end_pos, axis, slope, intercept })
    }

    /// Like [`new`](Self::new) with the axis given by number (0 = x, 1 = y,
    /// 2 = z).  Any other number is a configuration error.
    pub fn along_axis_index(
        start_value: f64,
        end_value:   f64,
        start_pos:   f64,
        end_pos:     f64,
        axis:        u8,
    ) -> FieldResult<Self> {
        let axis = Axis::try_from(axis)?;
        Self::new(start_value, end_value, start_pos, end_pos, axis)
    }

    #[inline]
    pub fn slope(&self) -> f64 {
        self.slope
    }

    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Profile for LinearGradient {
    #[inline]
    fn value_at(&self, p: Point3) -> f64 {
        self.slope * p.along(self.axis) + self.intercept
    }
}
