use crate::seed_field::SeedField;
use anyhow::Result;
use log::{debug, trace, warn};
use phyllotaxis_common::{angle_to_vec, GrowthParams, Snapshot};
use std::f64::consts::{PI, TAU};
use std::sync::{Arc, RwLock, RwLockReadGuard};

/// Lifecycle of a growth run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthState {
    Running,
    /// The clock has passed `run_length`; further steps do nothing.
    Terminal,
}

/// Record of one nucleation event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nucleation {
    /// Timestep at which the seed was created.
    pub step: u64,
    /// Index of the new seed in the field.
    pub seed_index: usize,
    /// Angle chosen by the potential minimizer, in `[0, 2π)`.
    pub angle: f64,
}

/// Read-only handle onto a simulator's seed field, for presentation code.
///
/// The simulator holds the write lock for the whole of each step, so a reader holding
/// the guard from [`FieldReader::read`] always sees a fully advanced timestep.
#[derive(Debug, Clone)]
pub struct FieldReader {
    field: Arc<RwLock<SeedField>>,
}

impl FieldReader {
    pub fn read(&self) -> Result<RwLockReadGuard<'_, SeedField>> {
        self.field
            .read()
            .map_err(|_| anyhow::anyhow!("Seed field lock poisoned."))
    }
}

/// Drives seed nucleation and radial drift over a [`SeedField`].
pub struct GrowthSimulator {
    params: GrowthParams,
    field: Arc<RwLock<SeedField>>,
    /// The timestep counter `t`. Starts at 0, incremented once per step.
    current_step: u64,
    nucleations: Vec<Nucleation>,
}

impl GrowthSimulator {
    /// Creates a simulator with an empty field at `t = 0`.
    pub fn new(params: GrowthParams) -> Self {
        Self {
            field: Arc::new(RwLock::new(SeedField::new(params.growth_strength))),
            params,
            current_step: 0,
            nucleations: Vec::new(),
        }
    }

    pub fn params(&self) -> &GrowthParams {
        &self.params
    }

    pub fn current_step(&self) -> u64 {
        self.current_step
    }

    pub fn state(&self) -> GrowthState {
        if self.current_step > self.params.run_length {
            GrowthState::Terminal
        } else {
            GrowthState::Running
        }
    }

    /// Nucleation log, oldest first. Entry `k` describes seed `k`.
    pub fn nucleations(&self) -> &[Nucleation] {
        &self.nucleations
    }

    /// Returns a handle presentation code can use to poll the seed field.
    pub fn reader(&self) -> FieldReader {
        FieldReader { field: Arc::clone(&self.field) }
    }

    pub fn seed_count(&self) -> Result<usize> {
        Ok(self.read_field()?.count())
    }

    fn read_field(&self) -> Result<RwLockReadGuard<'_, SeedField>> {
        self.field
            .read()
            .map_err(|_| anyhow::anyhow!("Seed field lock poisoned."))
    }

    /// Advances the simulation by one timestep.
    ///
    /// Nucleates a seed on the meristem circle if `t` is a multiple of the nucleation period,
    /// then moves every seed (including one just nucleated) outward by `dt * V_r`.
    pub fn step(&mut self) -> Result<GrowthState> {
        if self.state() == GrowthState::Terminal {
            warn!("Step requested after run end (t = {}). Ignoring.", self.current_step);
            return Ok(GrowthState::Terminal);
        }

        let t = self.current_step;
        {
            let mut field = self
                .field
                .write()
                .map_err(|_| anyhow::anyhow!("Seed field lock poisoned."))?;

            // --- 1. Nucleation ---
            if t % u64::from(self.params.nucleation_period.get()) == 0 {
                let angle = field.minimize_potential(self.params.meristem_radius);
                field.add(self.params.meristem_radius, angle);
                let seed_index = field.count() - 1;
                debug!("t={}: nucleated seed {} at {:.4} rad", t, seed_index, angle);
                self.nucleations.push(Nucleation { step: t, seed_index, angle });
            }

            // --- 2. Radial drift (explicit Euler) ---
            let displacement = self.params.dt * self.params.drift_speed;
            for i in 0..field.count() {
                let pos = field.position(i)?;
                let theta = field.angle(i)?;
                let next = pos + angle_to_vec(theta) * displacement;
                field.set_position(i, next)?;
            }
        }

        self.current_step += 1;
        trace!("t={} complete", t);
        Ok(self.state())
    }

    /// Steps until the run is terminal. Returns the number of steps executed.
    pub fn run_to_end(&mut self) -> Result<u64> {
        let mut executed = 0;
        while self.state() == GrowthState::Running {
            self.step()?;
            executed += 1;
        }
        Ok(executed)
    }

    /// Mean angular gap between consecutive nucleations, folded into [0°, 180°].
    pub fn mean_divergence_deg(&self) -> Option<f64> {
        mean_divergence_deg(&self.nucleations)
    }

    /// Summarizes the current state of the field.
    pub fn snapshot(&self, include_positions: bool) -> Result<Snapshot> {
        let field = self.read_field()?;
        let count = field.count();
        let radii: Vec<f64> = field.seeds().iter().map(|s| s.position.length()).collect();
        let mean_radius = if count > 0 { radii.iter().sum::<f64>() / count as f64 } else { 0.0 };
        let max_radius = radii.iter().copied().fold(0.0, f64::max);

        Ok(Snapshot {
            step: self.current_step,
            time: self.current_step as f64 * self.params.dt,
            seed_count: u32::try_from(count)?,
            mean_radius,
            max_radius,
            mean_divergence_deg: self.mean_divergence_deg(),
            positions: include_positions.then(|| field.positions()),
        })
    }
}

/// Divergence angles between consecutive nucleations, each folded into `[0, π]`.
pub fn divergence_angles(nucleations: &[Nucleation]) -> Vec<f64> {
    nucleations
        .windows(2)
        .map(|w| {
            let d = (w[1].angle - w[0].angle).rem_euclid(TAU);
            if d > PI { TAU - d } else { d }
        })
        .collect()
}

fn mean_divergence_deg(nucleations: &[Nucleation]) -> Option<f64> {
    let angles = divergence_angles(nucleations);
    if angles.is_empty() {
        return None;
    }
    Some((angles.iter().sum::<f64>() / angles.len() as f64).to_degrees())
}
