use anyhow::Result;
use clap::Parser;
use log::{info, warn, error, debug, trace};
use std::path::PathBuf;
use std::time::Instant;

use phyllotaxis_common::{SimulationConfig, Snapshot};
use phyllotaxis_engine::{output, sweep, GrowthSimulator, GrowthState};

/// Command-line arguments for the growth engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the run length (last executed timestep) from the config
    #[arg(long)]
    steps: Option<u64>,

    /// Directory output files are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init();
    let args = Args::parse();

    info!("Starting Phyllotaxis Growth Engine...");

    // --- Load Configuration ---
    let mut config = SimulationConfig::load(&args.config)?;
    if let Some(steps) = args.steps {
        info!("Overriding run length {} -> {} from command line.", config.timing.run_length, steps);
        config.timing.run_length = steps;
    }
    let params = config.get_sim_params()?;
    info!(
        "Meristem radius {:.3}, G {:.3}, V_r {:.3}, dt {:.4}, period {} steps, pattern parameter {:.3}",
        params.meristem_radius,
        params.growth_strength,
        params.drift_speed,
        params.dt,
        params.nucleation_period,
        params.pattern_parameter()
    );
    debug!("Growth Parameters: {:#?}", params);

    std::fs::create_dir_all(&args.output_dir)?;

    // --- Initialize Simulation ---
    let mut sim = GrowthSimulator::new(params);
    let total_steps = params.total_steps();
    let record_interval_steps = config.record_interval_steps();
    if config.timing.record_interval_steps == 0 {
        warn!("Record interval of 0 steps requested. Recording every step.");
    }
    info!("Recording snapshot every {} steps ({:.2} time units).",
        record_interval_steps, record_interval_steps as f64 * params.dt);

    let include_positions = config.output.save_positions_in_snapshot;
    let mut snapshots: Vec<Snapshot> = Vec::new();

    // --- Initial Snapshot (t = 0) ---
    info!("Recording initial snapshot (t=0)...");
    snapshots.push(sim.snapshot(include_positions)?);

    // --- Simulation Loop ---
    info!("Starting simulation loop for {} steps...", total_steps);
    let start_time = Instant::now();
    let mut previous_print_time = start_time;
    let print_interval_secs = 5.0;

    while sim.state() == GrowthState::Running {
        let step_start_time = Instant::now();
        let state = match sim.step() {
            Ok(state) => state,
            Err(e) => {
                error!("Error during simulation step {}: {}", sim.current_step(), e);
                anyhow::bail!("Simulation step failed.");
            }
        };
        let step_duration = step_start_time.elapsed();
        let executed = sim.current_step();

        let current_time = Instant::now();
        let should_print_status = current_time.duration_since(previous_print_time).as_secs_f64() >= print_interval_secs;
        let is_record_step = executed % record_interval_steps == 0;
        let is_last_step = state == GrowthState::Terminal;

        if should_print_status || is_record_step || is_last_step {
            info!(
                "Step [{}/{}] (t={:.2}) | Seeds: {} | Step Time: {:6.3} ms | Elapsed: {:.2} s",
                executed,
                total_steps,
                executed as f64 * params.dt,
                sim.seed_count()?,
                step_duration.as_secs_f64() * 1000.0,
                start_time.elapsed().as_secs_f64()
            );
            previous_print_time = current_time;

            // --- Record Snapshot ---
            if is_record_step || is_last_step {
                snapshots.push(sim.snapshot(include_positions)?);
            }
        } else {
            trace!(
                "Step [{}/{}] completed in {:.3} ms",
                executed,
                total_steps,
                step_duration.as_secs_f64() * 1000.0
            );
        }
    }

    let total_duration = start_time.elapsed();
    info!(
        "Simulation finished in {:.3} seconds with {} seeds.",
        total_duration.as_secs_f64(),
        sim.seed_count()?
    );
    match sim.mean_divergence_deg() {
        Some(d) => info!("Mean divergence angle: {:.3} deg", d),
        None => info!("Fewer than two seeds; no divergence angle."),
    }

    // --- Save Recorded Data ---
    info!("Saving recorded data...");
    if config.output.save_stats {
        if let Err(e) = output::write_snapshots(&args.output_dir, &config.output, &snapshots) {
            error!("Error saving snapshots: {:#}", e);
        }
    } else {
        info!("Skipping saving snapshots as per config (save_stats is false).");
    }

    if config.output.save_positions {
        let reader = sim.reader();
        let field = reader.read()?;
        if let Err(e) = output::write_final_positions(&args.output_dir, &config.output, &field) {
            error!("Error saving final positions: {:#}", e);
        }
    } else {
        info!("Skipping saving final positions as per config.");
    }

    // --- Optional Parameter Sweep ---
    if let Some(sweep_config) = config.sweep.as_ref().filter(|s| !s.drift_speeds.is_empty()) {
        let results = sweep::run_sweep(&params, &sweep_config.drift_speeds)?;
        if let Err(e) = output::write_sweep(&args.output_dir, &config.output, &results) {
            error!("Error saving sweep summary: {:#}", e);
        }
    }

    info!("Simulation Complete.");
    Ok(())
}
