// Navigability report assembly: the one externally visible result.
//
// `analyze()` runs the pipeline for a single grid:
//
//   labeling -> percolation -> (Blocked | Disconnected | Connected)
//
// and only a Connected grid pays for the distance transform, the diameter
// search, and the geodesic search. Blocked and Disconnected are normal
// outcomes carrying sentinel values (diameter 0, tortuosity infinite), not
// errors. The only errors are invalid input, and the grid constructors have
// already rejected malformed grids by the time `analyze()` sees one, so the
// config is all that is left to check here.
//
// Each call is self-contained and deterministic. `analyze_batch()` runs
// independent grids on the rayon pool, one grid per task.
//
// JSON shape: exactly the four keys of `NavigabilityReport`. JSON has no
// infinity, so an infinite tortuosity is written as `null` and read back as
// infinity.
//
// See also: `percolation.rs`, `diameter.rs`, `geodesic.rs` for the phases,
// `stats.rs` for the supplementary morphology numbers.

use crate::config::AnalysisConfig;
use crate::diameter::percolation_diameter;
use crate::distance::DistanceField;
use crate::error::Result;
use crate::geodesic::{geodesic_length, straight_line_voxels};
use crate::grid::VoxelGrid;
use crate::percolation::detect;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// How the void space relates to the entry and exit faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PercolationStatus {
    /// The largest void cluster spans from the entry face to the exit face.
    Connected,
    /// Void exists, but the largest cluster does not span.
    Disconnected,
    /// No void voxels at all.
    Blocked,
}

impl fmt::Display for PercolationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PercolationStatus::Connected => "Connected",
            PercolationStatus::Disconnected => "Disconnected",
            PercolationStatus::Blocked => "Blocked",
        };
        f.write_str(s)
    }
}

/// Navigability metrics for one grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigabilityReport {
    /// Diameter of the widest sphere that can cross the sample, in the same
    /// physical unit as `voxel_size`. 0 unless Connected.
    pub percolation_diameter_um: f64,
    /// Geodesic length over straight-line length. >= 1 when Connected,
    /// infinite otherwise.
    #[serde(with = "infinite_as_null")]
    pub tortuosity_index: f64,
    pub percolation_status: PercolationStatus,
    /// Main cluster voxels / total voxels.
    pub effective_porosity: f64,
}

impl NavigabilityReport {
    fn blocked() -> Self {
        Self {
            percolation_diameter_um: 0.0,
            tortuosity_index: f64::INFINITY,
            percolation_status: PercolationStatus::Blocked,
            effective_porosity: 0.0,
        }
    }

    fn disconnected(effective_porosity: f64) -> Self {
        Self {
            percolation_diameter_um: 0.0,
            tortuosity_index: f64::INFINITY,
            percolation_status: PercolationStatus::Disconnected,
            effective_porosity,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.percolation_status == PercolationStatus::Connected
    }
}

/// Analyze one grid.
pub fn analyze(grid: &VoxelGrid, config: &AnalysisConfig) -> Result<NavigabilityReport> {
    config.validate()?;

    let percolation = detect(grid, config);
    let report = match percolation.main_cluster {
        None => NavigabilityReport::blocked(),
        Some(cluster) => {
            let effective_porosity = cluster.size() as f64 / grid.len() as f64;
            if !percolation.is_percolating {
                NavigabilityReport::disconnected(effective_porosity)
            } else {
                let voxel_size = grid.voxel_size();
                let field = DistanceField::compute(grid);
                let diameter = percolation_diameter(&cluster, &field, voxel_size, config);
                let geodesic = geodesic_length(&cluster, voxel_size, config.flow_axis);
                let straight = straight_line_voxels(&cluster, config.flow_axis) * voxel_size;
                NavigabilityReport {
                    percolation_diameter_um: diameter,
                    tortuosity_index: geodesic / straight,
                    percolation_status: PercolationStatus::Connected,
                    effective_porosity,
                }
            }
        }
    };

    info!(
        dims = %grid.dims(),
        status = %report.percolation_status,
        diameter = report.percolation_diameter_um,
        tortuosity = report.tortuosity_index,
        porosity = report.effective_porosity,
        "navigability analyzed"
    );
    Ok(report)
}

/// Analyze independent grids in parallel. Results are in input order.
pub fn analyze_batch(
    grids: &[VoxelGrid],
    config: &AnalysisConfig,
) -> Vec<Result<NavigabilityReport>> {
    grids.par_iter().map(|grid| analyze(grid, config)).collect()
}

/// Serde adapter writing infinite (or NaN) values as `null`.
mod infinite_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}
