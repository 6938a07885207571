pub mod config;
pub mod sim_params;
pub mod snapshot;
pub mod vecmath;

// Re-export key types for easier use by dependent crates
pub use config::{SimulationConfig, MeristemConfig, DriftConfig, TimingConfig, OutputConfig, SweepConfig};
pub use sim_params::GrowthParams;
pub use snapshot::Snapshot;
pub use vecmath::{Vec2, angle_to_vec, pol2cart};
