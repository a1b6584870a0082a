//! Geometric split rules: how a dividing cell's state becomes two daughters.

use cs_core::{Point3, SimRng, sphere_diameter, sphere_volume};

/// The physical state a split rule reads and writes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellState {
    pub position: Point3,
    pub diameter: f64,
}

impl CellState {
    pub fn new(position: Point3, diameter: f64) -> Self {
        Self { position, diameter }
    }

    #[inline]
    pub fn volume(&self) -> f64 {
        sphere_volume(self.diameter)
    }
}

/// Derives the two daughters of a division from the mother's state.
///
/// The first returned state is written back to the mother (who continues as
/// one daughter); the second becomes the newly registered agent.  Called from
/// the sequential apply phase only, so `rng` draws happen in agent-id order.
pub trait SplitRule: Send + Sync {
    fn split(&self, mother: CellState, rng: &mut SimRng) -> (CellState, CellState);
}

/// Volume-halving split along a uniformly random axis.
///
/// Each daughter gets half the mother's volume, so `d' = d / 2^(1/3)`.  The
/// two centres sit at `±d'/2` from the mother's centre: the spheres touch
/// and the centre of mass is unchanged.
#[derive(Copy, Clone, Debug, Default)]
pub struct SymmetricSplit;

impl SplitRule for SymmetricSplit {
    fn split(&self, mother: CellState, rng: &mut SimRng) -> (CellState, CellState) {
        let d = sphere_diameter(mother.volume() / 2.0);
        let offset = rng.unit_vector() * (d / 2.0);
        (
            CellState::new(mother.position + offset, d),
            CellState::new(mother.position - offset, d),
        )
    }
}
