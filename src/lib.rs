//! Phyllotactic growth engine.
//!
//! - [`seed_field`]: seed storage, geometric queries and the repulsive potential.
//! - [`simulation`]: the timestep loop (nucleation + radial drift) and its read handle.
//! - [`output`]: snapshot and CSV writers used by the driver.
//! - [`sweep`]: independent runs across drift speeds, in parallel.

pub mod error;
pub mod output;
pub mod seed_field;
pub mod simulation;
pub mod sweep;

pub use error::FieldError;
pub use seed_field::{Seed, SeedField, ANGLE_STEP};
pub use simulation::{FieldReader, GrowthSimulator, GrowthState, Nucleation};
