// Percolation detection: does the largest void cluster span the sample?
//
// Labels the whole void space, takes the largest component, and tests it
// for membership on both the entry face and the exit face of the flow axis.
// The face test itself is a pure scan of the cluster's members.

use crate::config::AnalysisConfig;
use crate::grid::VoxelGrid;
use crate::labeling::{Component, ComponentLabels, label_components, label_components_parallel};
use crate::types::{Connectivity, Dims};
use tracing::debug;

/// Outcome of percolation detection for one grid.
#[derive(Clone, Debug)]
pub struct PercolationResult {
    /// Largest void component, `None` if the grid has no void voxels.
    pub main_cluster: Option<Component>,
    /// Whether `main_cluster` touches both faces of the flow axis.
    pub is_percolating: bool,
    /// Number of void components found.
    pub component_count: usize,
    /// Number of void voxels in the grid.
    pub void_count: usize,
}

impl PercolationResult {
    /// Voxel count of the main cluster (0 when there is none).
    pub fn main_cluster_size(&self) -> usize {
        self.main_cluster.as_ref().map_or(0, Component::size)
    }
}

/// Label `open` with the strategy selected by `config`.
pub fn label_with(
    dims: Dims,
    open: &[bool],
    connectivity: Connectivity,
    config: &AnalysisConfig,
) -> ComponentLabels {
    if config.parallel_labeling {
        label_components_parallel(dims, open, connectivity, config.slab_depth)
    } else {
        label_components(dims, open, connectivity)
    }
}

/// Find the largest void cluster and decide whether it percolates along
/// `config.flow_axis`.
pub fn detect(grid: &VoxelGrid, config: &AnalysisConfig) -> PercolationResult {
    let labels = label_with(grid.dims(), &grid.void_mask(), config.connectivity, config);
    let void_count = labels.labeled_count();
    let component_count = labels.count();

    let main_cluster = labels.largest().map(|id| labels.component(id));
    let is_percolating = void_count >= 2
        && main_cluster
            .as_ref()
            .is_some_and(|c| c.spans(config.flow_axis));

    debug!(
        components = component_count,
        void_voxels = void_count,
        main_cluster = main_cluster.as_ref().map_or(0, Component::size),
        main_cluster_id = ?main_cluster.as_ref().map(Component::id),
        is_percolating,
        "percolation detected"
    );

    PercolationResult {
        main_cluster,
        is_percolating,
        component_count,
        void_count,
    }
}
