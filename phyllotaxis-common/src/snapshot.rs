use serde::{Serialize, Deserialize};

/// A snapshot of the seed field and its summary metrics at a specific timestep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// The timestep counter value at which the snapshot was taken.
    pub step: u64,
    /// Simulated time, `step * dt`.
    pub time: f64,
    /// The number of seeds nucleated so far.
    pub seed_count: u32,
    /// Mean distance of the seeds from the origin (0 for an empty field).
    pub mean_radius: f64,
    /// Distance of the outermost seed from the origin.
    pub max_radius: f64,
    /// Mean angular gap between consecutive nucleations, folded into [0, 180] degrees.
    /// `None` until at least two seeds exist.
    pub mean_divergence_deg: Option<f64>,
    /// Raw [x, y] positions of all seeds, in nucleation order.
    /// Included only if `output.save_positions_in_snapshot` is set.
    pub positions: Option<Vec<(f64, f64)>>,
}
