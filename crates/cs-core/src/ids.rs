//! Typed identifiers for agents and substances.
//!
//! Both wrap a plain integer that doubles as an index into the registry's
//! and the field's column storage; `.index()` does the cast.

use std::fmt;

/// Declares a `Copy + Ord` newtype over an unsigned integer with an
/// `INVALID` sentinel (the integer's maximum).
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Position in the owning column store.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of an agent slot in the registry arena.
    ///
    /// Allocated monotonically and never reused, so a removed agent's id
    /// keeps pointing at its tombstone slot for the rest of the run.
    pub struct AgentId(u32);
}

typed_id! {
    /// Identifier of a diffusible substance defined on the field solver.
    pub struct SubstanceId(u16);
}
