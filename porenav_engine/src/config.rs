// Data-driven analysis configuration.
//
// All tunable parameters of an analysis live in `AnalysisConfig`, passed
// explicitly to every entry point. There is no global or cached config: two
// calls with the same grid and the same config always produce the same
// report.
//
// Configs are plain JSON (see `from_json_str()` / `load()`); missing fields
// fall back to `Default`, so a config file only needs the keys it changes.
//
// See also: `report.rs` which validates and consumes the config,
// `labeling.rs` for what `parallel_labeling` / `slab_depth` control.

use crate::error::{AnalysisError, Result};
use crate::types::{Axis, Connectivity};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters for one navigability analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Adjacency rule for labeling and for the geodesic search. Both steps
    /// always use the same rule.
    pub connectivity: Connectivity,

    /// Axis whose first and last layers are the entry and exit faces.
    pub flow_axis: Axis,

    /// Width (in voxel units) at which the clearance-radius bisection stops.
    pub diameter_tolerance: f64,

    /// Label components slab-by-slab on the rayon pool and merge across slab
    /// boundaries. Output is identical to the sequential labeler.
    pub parallel_labeling: bool,

    /// Number of layers per slab when `parallel_labeling` is enabled.
    pub slab_depth: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Six,
            flow_axis: Axis::Z,
            diameter_tolerance: 0.01,
            parallel_labeling: true,
            slab_depth: 16,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject parameter values that would make the analysis ill-defined.
    pub fn validate(&self) -> Result<()> {
        if !self.diameter_tolerance.is_finite() || self.diameter_tolerance <= 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "diameter_tolerance must be finite and positive, got {}",
                self.diameter_tolerance
            )));
        }
        if self.slab_depth == 0 {
            return Err(AnalysisError::InvalidConfig(
                "slab_depth must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
