use crate::simulation::GrowthSimulator;
use anyhow::Result;
use log::info;
use phyllotaxis_common::GrowthParams;
use rayon::prelude::*;
use serde::Serialize;

/// Summary of one complete run at a given drift speed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepResult {
    pub drift_speed: f64,
    pub pattern_parameter: f64,
    pub seed_count: u32,
    pub mean_divergence_deg: Option<f64>,
    pub max_radius: f64,
}

/// Runs one independent simulation per drift speed, in parallel across runs.
/// Each run is single-threaded. Results come back in the order of `drift_speeds`.
pub fn run_sweep(base: &GrowthParams, drift_speeds: &[f64]) -> Result<Vec<SweepResult>> {
    info!(
        "Sweeping {} drift speeds on {} Rayon threads.",
        drift_speeds.len(),
        rayon::current_num_threads()
    );

    drift_speeds
        .par_iter()
        .map(|&speed| {
            let params = base.with_drift_speed(speed);
            let mut sim = GrowthSimulator::new(params);
            sim.run_to_end()?;
            let snapshot = sim.snapshot(false)?;
            info!(
                "Sweep run V_r={:.3} (pattern parameter {:.3}): {} seeds, mean divergence {}",
                speed,
                params.pattern_parameter(),
                snapshot.seed_count,
                snapshot
                    .mean_divergence_deg
                    .map(|d| format!("{:.2} deg", d))
                    .unwrap_or_else(|| "n/a".to_string())
            );
            Ok(SweepResult {
                drift_speed: speed,
                pattern_parameter: params.pattern_parameter(),
                seed_count: snapshot.seed_count,
                mean_divergence_deg: snapshot.mean_divergence_deg,
                max_radius: snapshot.max_radius,
            })
        })
        .collect()
}
