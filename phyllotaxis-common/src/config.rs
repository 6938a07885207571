use serde::{Deserialize, Serialize};
use anyhow::Result;
use crate::sim_params::GrowthParams;
use std::num::NonZeroU32;
use std::path::Path;

// Configuration for the nucleation region and seed interaction
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct MeristemConfig {
    pub radius: f64,
    pub growth_strength: f64,
}

// Configuration for the outward drift of existing seeds
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DriftConfig {
    pub speed: f64,
}

// Configuration for timing
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TimingConfig {
    pub dt: f64,
    pub nucleation_period: u32,
    pub run_length: u64,
    #[serde(default = "default_record_interval_steps")]
    pub record_interval_steps: u64,
}

// Configuration for output settings, loaded from config.toml
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub base_filename: String,
    pub save_positions: bool,
    pub save_stats: bool,
    #[serde(default)]
    pub save_positions_in_snapshot: bool,
    pub format: Option<String>, // Output format: "json", "bincode", "messagepack"
}

// Optional list of drift speeds to run side by side
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SweepConfig {
    #[serde(default)]
    pub drift_speeds: Vec<f64>,
}

fn default_record_interval_steps() -> u64 {
    50
}

// Main simulation configuration structure, loaded from config.toml.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SimulationConfig {
    pub meristem: MeristemConfig,
    pub drift: DriftConfig,
    pub timing: TimingConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub sweep: Option<SweepConfig>,
}

impl SimulationConfig {
    /// Loads the simulation configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path_ref.display(), e))?;
        Self::from_toml_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Invalid config '{}': {}", path_ref.display(), e))
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects parameter sets the growth engine cannot run meaningfully.
    pub fn validate(&self) -> Result<()> {
        if !(self.meristem.radius > 0.0) {
            anyhow::bail!("meristem.radius must be positive.");
        }
        if !(self.meristem.growth_strength > 0.0) {
            anyhow::bail!("meristem.growth_strength must be positive.");
        }
        if !(self.timing.dt > 0.0) {
            anyhow::bail!("timing.dt must be positive.");
        }
        if self.timing.nucleation_period == 0 {
            anyhow::bail!("timing.nucleation_period must be at least 1.");
        }
        if !self.drift.speed.is_finite() {
            anyhow::bail!("drift.speed must be finite.");
        }
        if let Some(sweep) = &self.sweep {
            if let Some(bad) = sweep.drift_speeds.iter().find(|v| !(**v > 0.0) || !v.is_finite()) {
                anyhow::bail!("sweep.drift_speeds must all be positive (found {}).", bad);
            }
        }
        Ok(())
    }

    /// Converts the configuration into the immutable parameters used at runtime.
    pub fn get_sim_params(&self) -> Result<GrowthParams> {
        let nucleation_period = NonZeroU32::new(self.timing.nucleation_period)
            .ok_or_else(|| anyhow::anyhow!("timing.nucleation_period must be at least 1."))?;

        Ok(GrowthParams {
            meristem_radius: self.meristem.radius,
            growth_strength: self.meristem.growth_strength,
            drift_speed: self.drift.speed,
            dt: self.timing.dt,
            nucleation_period,
            run_length: self.timing.run_length,
        })
    }

    /// Record interval in steps, never zero.
    pub fn record_interval_steps(&self) -> u64 {
        self.timing.record_interval_steps.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOWER: &str = r#"
        [meristem]
        radius = 0.5
        growth_strength = 1.0

        [drift]
        speed = 1.0

        [timing]
        dt = 0.05
        nucleation_period = 3
        run_length = 3250

        [output]
        base_filename = "flower"
        save_positions = true
        save_stats = true
        format = "bincode"
    "#;

    #[test]
    fn parses_reference_flower() {
        let config = SimulationConfig::from_toml_str(FLOWER).unwrap();
        assert_eq!(config.meristem.radius, 0.5);
        assert_eq!(config.timing.nucleation_period, 3);
        assert_eq!(config.timing.record_interval_steps, 50);
        assert!(!config.output.save_positions_in_snapshot);
        assert!(config.sweep.is_none());

        let params = config.get_sim_params().unwrap();
        assert_eq!(params.nucleation_period.get(), 3);
        assert_eq!(params.run_length, 3250);
        assert_eq!(params.dt, 0.05);
    }

    #[test]
    fn parses_sweep_section() {
        let text = format!("{FLOWER}\n[sweep]\ndrift_speeds = [0.5, 1.0, 2.0]\n");
        let config = SimulationConfig::from_toml_str(&text).unwrap();
        assert_eq!(config.sweep.unwrap().drift_speeds, vec![0.5, 1.0, 2.0]);
    }

    #[test]
    fn rejects_zero_nucleation_period() {
        let text = FLOWER.replace("nucleation_period = 3", "nucleation_period = 0");
        let err = SimulationConfig::from_toml_str(&text).unwrap_err();
        assert!(err.to_string().contains("nucleation_period"));
    }

    #[test]
    fn rejects_non_positive_radius() {
        let text = FLOWER.replace("radius = 0.5", "radius = 0.0");
        assert!(SimulationConfig::from_toml_str(&text).is_err());
    }

    #[test]
    fn rejects_non_positive_timestep() {
        let text = FLOWER.replace("dt = 0.05", "dt = -0.05");
        assert!(SimulationConfig::from_toml_str(&text).is_err());
    }

    #[test]
    fn rejects_negative_sweep_speed() {
        let text = format!("{FLOWER}\n[sweep]\ndrift_speeds = [1.0, -2.0]\n");
        let err = SimulationConfig::from_toml_str(&text).unwrap_err();
        assert!(err.to_string().contains("-2"));
    }

    #[test]
    fn record_interval_never_zero() {
        let text = FLOWER.replace("run_length = 3250", "run_length = 3250\nrecord_interval_steps = 0");
        let config = SimulationConfig::from_toml_str(&text).unwrap();
        assert_eq!(config.record_interval_steps(), 1);
    }

    #[test]
    fn shipped_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../config.toml");
        let config = SimulationConfig::load(path).unwrap();
        let params = config.get_sim_params().unwrap();
        assert_eq!(params.meristem_radius, 0.5);
        assert_eq!(params.pattern_parameter(), 6.0);
        assert_eq!(config.output.format.as_deref(), Some("json"));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = SimulationConfig::load("/nonexistent/phyllotaxis.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
