// Error taxonomy for the engine.
//
// Only violated input preconditions (and the I/O around loading configs or
// volumes) are errors. Physical outcomes such as "no void space" or "no
// spanning path" are reported through `PercolationStatus`, never here.

use crate::types::Dims;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("grid dimensions must all be positive, got {dims}")]
    EmptyDimension { dims: Dims },

    #[error("grid dimensions {dims} are too large to index")]
    DimensionTooLarge { dims: Dims },

    #[error("grid {dims} needs {expected} voxels but {actual} were provided")]
    DimensionMismatch {
        dims: Dims,
        expected: usize,
        actual: usize,
    },

    #[error("voxel size must be finite and positive, got {0}")]
    InvalidVoxelSize(f64),

    #[error("voxel {index} has value {value}; only 0 (void) and 1 (solid) are allowed")]
    NonBinaryValue { index: usize, value: u8 },

    #[error("invalid analysis config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
