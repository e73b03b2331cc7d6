// porenav_engine — pore-network connectivity and navigability analysis.
//
// Given a voxelized porous structure (solid vs. void) and its physical voxel
// size, answers two questions: can something get from one face of the
// sample to the opposite face through the void space, and how large and how
// direct is the best route? The answer is a `NavigabilityReport` with four
// numbers: percolation diameter, tortuosity index, percolation status, and
// effective porosity.
//
// Module overview:
// - `types.rs`:       VoxelCoord, Dims (flat indexing, neighbors, faces), Axis, Connectivity.
// - `grid.rs`:        VoxelGrid, the immutable solid/void occupancy array plus voxel size.
// - `labeling.rs`:    Connected-component labeling of void voxels (sequential and slab-parallel).
// - `distance.rs`:    Exact Euclidean distance transform (void voxel -> nearest solid).
// - `percolation.rs`: Largest void cluster + does it span entry to exit face.
// - `diameter.rs`:    Bisection for the widest sphere that can still cross the sample.
// - `geodesic.rs`:    Shortest entry-to-exit path through the main cluster.
// - `report.rs`:      `analyze()` / `analyze_batch()` and the NavigabilityReport record.
// - `stats.rs`:       Supplementary pore statistics (porosity, interconnectivity, mean pore size).
// - `config.rs`:      AnalysisConfig, all tunable parameters (JSON-loadable).
// - `error.rs`:       AnalysisError, raised only for invalid input or config.
//
// The companion crate `porenav_cli` wraps this library in a command-line
// tool that reads raw byte volumes. This crate does no I/O beyond optional
// config loading, and never installs a tracing subscriber.
//
// **Critical constraint: determinism.** `analyze()` is a pure function of
// `(grid, config)`. Parallel phases produce output identical to their
// sequential counterparts, and there is no global or cached state.

pub mod config;
pub mod diameter;
pub mod distance;
pub mod error;
pub mod geodesic;
pub mod grid;
pub mod labeling;
pub mod percolation;
pub mod report;
pub mod stats;
pub mod types;

pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use grid::VoxelGrid;
pub use report::{NavigabilityReport, PercolationStatus, analyze, analyze_batch};
pub use stats::{PoreStatistics, pore_statistics};
pub use types::{Axis, Connectivity, Dims, VoxelCoord};
