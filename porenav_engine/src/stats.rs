// Pore morphology statistics reported alongside the navigability metrics.
//
// These are whole-sample numbers derived from the same labeling and distance
// field the navigability analysis uses. Unlike `NavigabilityReport` they
// look at all void voxels, not just the main cluster's crossing.

use crate::config::AnalysisConfig;
use crate::distance::DistanceField;
use crate::grid::VoxelGrid;
use crate::percolation::detect;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoreStatistics {
    /// Void voxels / total voxels.
    pub porosity: f64,
    /// Largest component / void voxels. 0.0 when there is no void.
    pub interconnectivity: f64,
    pub component_count: usize,
    /// Twice the mean distance-to-solid over void voxels, in physical
    /// units. `None` when the grid has no void or no solid voxels.
    pub mean_pore_size_um: Option<f64>,
}

pub fn pore_statistics(grid: &VoxelGrid, config: &AnalysisConfig) -> PoreStatistics {
    let percolation = detect(grid, config);
    let void_count = percolation.void_count;
    let total = grid.len() as f64;

    let porosity = void_count as f64 / total;
    let interconnectivity = if void_count == 0 {
        0.0
    } else {
        percolation.main_cluster_size() as f64 / void_count as f64
    };

    let mean_pore_size_um = if void_count == 0 || grid.solid_count() == 0 {
        None
    } else {
        let field = DistanceField::compute(grid);
        let sum: f64 = field
            .values()
            .iter()
            .zip(grid.solid_mask())
            .filter(|&(_, &solid)| !solid)
            .map(|(&d, _)| d)
            .sum();
        Some(2.0 * sum / void_count as f64 * grid.voxel_size())
    };

    debug!(
        porosity,
        interconnectivity,
        components = percolation.component_count,
        "pore statistics computed"
    );

    PoreStatistics {
        porosity,
        interconnectivity,
        component_count: percolation.component_count,
        mean_pore_size_um,
    }
}
