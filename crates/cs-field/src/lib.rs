//! `cs-field` — diffusible substance fields for the cellsim framework.
//!
//! Behavior modules consume the field only through the point query of
//! [`ConcentrationField`]; the scheduler additionally needs [`FieldSolver`]
//! to advance it once per field-timestep.  Everything else in this crate is a
//! small reference solver so the framework runs end to end.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`field`]     | `ConcentrationField`, `FieldSolver` traits, `NoField`       |
//! | [`substance`] | `SubstanceSpec` — id, name, diffusion, decay, resolution    |
//! | [`grid`]      | `DiffusionGrid` — one substance on a cubic voxel grid        |
//! | [`registry`]  | `SubstanceRegistry` — define / initialize / query substances |
//! | [`profile`]   | `Profile` trait, `LinearGradient`, `Uniform`                |
//! | [`error`]     | `FieldError`, `FieldResult<T>`                              |
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut field = SubstanceRegistry::new(Bounds::new(-150.0, 150.0)?);
//! field.define_substance(SubstanceSpec::new(SubstanceId(0), "5-FU", 0.0, 0.0, 20))?;
//! field.initialize_substance(
//!     SubstanceId(0),
//!     "5-FU",
//!     &LinearGradient::new(500.0, 495.0, 0.0, 100.0, Axis::Z)?,
//! )?;
//! let c = field.concentration(SubstanceId(0), Point3::new(0.0, 0.0, 50.0))?;
//! ```

pub mod error;
pub mod field;
pub mod grid;
pub mod profile;
pub mod registry;
pub mod substance;


pub use error::{FieldError, FieldResult};
pub use field::{ConcentrationField, FieldSolver, NoField};
pub use grid::DiffusionGrid;
pub use profile::{LinearGradient, Profile, Uniform};
pub use registry::SubstanceRegistry;
pub use substance::SubstanceSpec;
