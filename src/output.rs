use crate::seed_field::SeedField;
use crate::sweep::SweepResult;
use anyhow::{Context, Result};
use log::{error, info};
use phyllotaxis_common::{OutputConfig, Snapshot};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Serialization format for recorded snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Bincode,
    MessagePack,
}

impl SnapshotFormat {
    /// Resolves the configured format name. Unknown names fall back to JSON.
    pub fn from_config(format: Option<&str>) -> Self {
        match format.unwrap_or("json") {
            "json" => SnapshotFormat::Json,
            "bincode" => SnapshotFormat::Bincode,
            "messagepack" => SnapshotFormat::MessagePack,
            other => {
                error!("Unknown output format: {}. Using JSON instead.", other);
                SnapshotFormat::Json
            }
        }
    }

    fn extension(self) -> &'static str {
        match self {
            SnapshotFormat::Json => "json",
            SnapshotFormat::Bincode => "bin",
            SnapshotFormat::MessagePack => "msgpack",
        }
    }
}

/// Writes all recorded snapshots to `<dir>/<base>_snapshots.<ext>` and returns the path.
pub fn write_snapshots(dir: &Path, output: &OutputConfig, snapshots: &[Snapshot]) -> Result<PathBuf> {
    let format = SnapshotFormat::from_config(output.format.as_deref());
    let path = dir.join(format!("{}_snapshots.{}", output.base_filename, format.extension()));
    let file = File::create(&path)
        .with_context(|| format!("Error creating snapshot file '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);

    match format {
        SnapshotFormat::Json => {
            serde_json::to_writer(&mut writer, snapshots)
                .context("Error serializing snapshots to JSON")?;
        }
        SnapshotFormat::Bincode => {
            bincode::serialize_into(&mut writer, snapshots)
                .context("Error serializing snapshots to bincode")?;
        }
        SnapshotFormat::MessagePack => {
            rmp_serde::encode::write(&mut writer, snapshots)
                .context("Error serializing snapshots to MessagePack")?;
        }
    }
    writer.flush()?;

    info!("{} snapshots saved to {}", snapshots.len(), path.display());
    Ok(path)
}

/// Writes final seed positions to `<dir>/<base>_final_positions.csv` and returns the path.
pub fn write_final_positions(dir: &Path, output: &OutputConfig, field: &SeedField) -> Result<PathBuf> {
    let path = dir.join(format!("{}_final_positions.csv", output.base_filename));
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Error creating CSV file '{}'", path.display()))?;

    writer.write_record(["index", "x", "y", "radius", "angle"])?;
    for i in 0..field.count() {
        let pos = field.position(i)?;
        writer.write_record(&[
            i.to_string(),
            format!("{:.6}", pos.x),
            format!("{:.6}", pos.y),
            format!("{:.6}", field.radius(i)?),
            format!("{:.6}", field.angle(i)?),
        ])?;
    }
    writer.flush()?;

    info!("Final positions of {} seeds saved to {}", field.count(), path.display());
    Ok(path)
}

/// Writes one row per sweep run to `<dir>/<base>_sweep.csv` and returns the path.
pub fn write_sweep(dir: &Path, output: &OutputConfig, results: &[SweepResult]) -> Result<PathBuf> {
    let path = dir.join(format!("{}_sweep.csv", output.base_filename));
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Error creating CSV file '{}'", path.display()))?;

    for result in results {
        writer.serialize(result)?;
    }
    writer.flush()?;

    info!("Sweep summary ({} runs) saved to {}", results.len(), path.display());
    Ok(path)
}
