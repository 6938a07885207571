use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Growth parameters derived from the configuration, fixed for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthParams {
    /// Radius of the circle new seeds are nucleated on (R_m).
    pub meristem_radius: f64,
    /// Interaction strength scaling every inverse-distance potential term (G).
    pub growth_strength: f64,
    /// Radial drift speed shared by all seeds (V_r).
    pub drift_speed: f64,
    /// Explicit Euler timestep.
    pub dt: f64,
    /// A new seed is nucleated every `nucleation_period` timesteps (P).
    pub nucleation_period: NonZeroU32,
    /// Last timestep that is executed (T_end). The run is terminal once `t > run_length`.
    pub run_length: u64,
}

impl GrowthParams {
    /// The dimensionless ratio `V_r * P / R_m` that selects which spiral family emerges.
    pub fn pattern_parameter(&self) -> f64 {
        self.drift_speed * f64::from(self.nucleation_period.get()) / self.meristem_radius
    }

    /// Returns a copy of these parameters with a different radial drift speed.
    pub fn with_drift_speed(&self, drift_speed: f64) -> Self {
        Self { drift_speed, ..*self }
    }

    /// Number of timesteps a complete run executes (`t = 0..=run_length`).
    pub fn total_steps(&self) -> u64 {
        self.run_length.saturating_add(1)
    }
}
