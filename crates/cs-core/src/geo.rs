//! 3D coordinate type, axis selection, domain bounds, and sphere geometry.
//!
//! `Point3` doubles as a displacement vector (migration steps, division
//! axes).  Coordinates are `f64`: cells are a few micrometres across in a
//! domain of a few hundred, and concentration lookups and volume arithmetic
//! share the same precision.

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use std::str::FromStr;

use crate::CoreError;

// ── Point3 ────────────────────────────────────────────────────────────────────

/// A point (or displacement) in continuous 3D space.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Coordinate along `axis`.
    #[inline]
    pub fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Euclidean length when used as a vector.
    #[inline]
    pub fn norm(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    #[inline]
    pub fn distance(self, other: Point3) -> f64 {
        (self - other).norm()
    }

    /// `true` if every component is finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Point3 {
    type Output = Point3;
    #[inline]
    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Point3 {
    #[inline]
    fn add_assign(&mut self, rhs: Point3) {
        *self = *self + rhs;
    }
}

impl Sub for Point3 {
    type Output = Point3;
    #[inline]
    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Point3 {
    type Output = Point3;
    #[inline]
    fn mul(self, rhs: f64) -> Point3 {
        Point3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Point3 {
    type Output = Point3;
    #[inline]
    fn neg(self) -> Point3 {
        Point3::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

// ── Axis ──────────────────────────────────────────────────────────────────────

/// One of the three Cartesian axes.
///
/// Host code that selects an axis by number or name goes through
/// `TryFrom<u8>` / `FromStr`, which reject anything but the three axes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl TryFrom<u8> for Axis {
    type Error = CoreError;

    fn try_from(n: u8) -> Result<Axis, CoreError> {
        match n {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            2 => Ok(Axis::Z),
            other => Err(CoreError::InvalidAxis(other.to_string())),
        }
    }
}

impl FromStr for Axis {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Axis, CoreError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(CoreError::InvalidAxis(s.to_owned())),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        })
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Axis-aligned cubic simulation domain `[min, max]³`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Build a domain, rejecting empty or non-finite ranges.
    pub fn new(min: f64, max: f64) -> Result<Self, CoreError> {
        if !(min.is_finite() && max.is_finite()) || min >= max {
            return Err(CoreError::Config(format!(
                "invalid domain bounds [{min}, {max}]"
            )));
        }
        Ok(Self { min, max })
    }

    /// Edge length of the cube.
    #[inline]
    pub fn extent(self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn contains(self, p: Point3) -> bool {
        [p.x, p.y, p.z].iter().all(|&c| c >= self.min && c <= self.max)
    }

    /// Clamp every coordinate of `p` into the domain.
    #[inline]
    pub fn clamp(self, p: Point3) -> Point3 {
        Point3::new(
            p.x.clamp(self.min, self.max),
            p.y.clamp(self.min, self.max),
            p.z.clamp(self.min, self.max),
        )
    }
}

// ── Sphere geometry ───────────────────────────────────────────────────────────

/// Volume of a sphere of diameter `d`: `π/6 · d³`.
#[inline]
pub fn sphere_volume(diameter: f64) -> f64 {
    PI / 6.0 * diameter.powi(3)
}

/// Inverse of [`sphere_volume`].
#[inline]
pub fn sphere_diameter(volume: f64) -> f64 {
    (6.0 * volume / PI).cbrt()
}
