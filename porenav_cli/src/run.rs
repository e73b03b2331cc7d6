// One CLI invocation: load the volume and config, analyze, render JSON.

use crate::args::CliOptions;
use porenav_engine::{AnalysisConfig, Result, VoxelGrid, analyze, pore_statistics};
use serde_json::{Value, json};
use tracing::info;

/// Run the analysis described by `options` and return the JSON document to
/// print. With `--stats` the output is `{ "report": ..., "statistics": ... }`,
/// otherwise just the report.
pub fn run(options: &CliOptions) -> Result<Value> {
    let config = match &options.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    let bytes = std::fs::read(&options.volume)?;
    info!(
        path = %options.volume.display(),
        dims = %options.dims,
        bytes = bytes.len(),
        "volume loaded"
    );
    let grid = VoxelGrid::from_bytes(options.dims, &bytes, options.voxel_size)?;

    let report = serde_json::to_value(analyze(&grid, &config)?)?;
    if options.stats {
        let statistics = serde_json::to_value(pore_statistics(&grid, &config))?;
        Ok(json!({ "report": report, "statistics": statistics }))
    } else {
        Ok(report)
    }
}
