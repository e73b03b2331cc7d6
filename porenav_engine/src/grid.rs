// Dense, immutable 3D occupancy grid: the engine's only input.
//
// The grid is stored as a flat `Vec<bool>` (true = solid, false = void)
// indexed by `x + y * nx + z * nx * ny`, giving O(1) reads.
//
// Construction validates every input precondition: non-empty dimensions
// whose voxel count is indexable, matching data length, finite positive
// voxel size, binary raw values. A `VoxelGrid` that exists is therefore
// always well-formed, and nothing downstream re-checks it. There is no
// mutation API.
//
// See also: `types.rs` for `Dims` and the flat-index arithmetic,
// `report.rs` for the `analyze()` entry point that consumes the grid.

use crate::error::{AnalysisError, Result};
use crate::types::{Dims, VoxelCoord};

/// Binary solid/void volume plus the physical edge length of one voxel.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    /// Flat storage: index = x + y * nx + z * nx * ny.
    solid: Vec<bool>,
    dims: Dims,
    /// Physical length per voxel edge (micrometers by convention).
    voxel_size: f64,
}

impl VoxelGrid {
    /// Build a grid from a flat occupancy vector (true = solid).
    pub fn new(dims: Dims, solid: Vec<bool>, voxel_size: f64) -> Result<Self> {
        let expected = validate_shape(dims, voxel_size)?;
        check_data_len(dims, expected, solid.len())?;
        Ok(Self {
            solid,
            dims,
            voxel_size,
        })
    }

    /// Build a grid from raw bytes, one per voxel: 0 = void, 1 = solid.
    /// Any other value is rejected rather than thresholded; segmentation is
    /// the caller's job.
    pub fn from_bytes(dims: Dims, bytes: &[u8], voxel_size: f64) -> Result<Self> {
        let expected = validate_shape(dims, voxel_size)?;
        check_data_len(dims, expected, bytes.len())?;
        let solid = bytes
            .iter()
            .enumerate()
            .map(|(index, &value)| match value {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(AnalysisError::NonBinaryValue { index, value }),
            })
            .collect::<Result<Vec<bool>>>()?;
        Ok(Self {
            solid,
            dims,
            voxel_size,
        })
    }

    /// Build a grid by evaluating `is_solid` at every coordinate.
    pub fn from_fn(
        dims: Dims,
        voxel_size: f64,
        mut is_solid: impl FnMut(VoxelCoord) -> bool,
    ) -> Result<Self> {
        let len = validate_shape(dims, voxel_size)?;
        let solid = (0..len).map(|i| is_solid(dims.coord(i))).collect();
        Ok(Self {
            solid,
            dims,
            voxel_size,
        })
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn voxel_size(&self) -> f64 {
        self.voxel_size
    }

    /// Total voxel count.
    pub fn len(&self) -> usize {
        self.solid.len()
    }

    /// Always false for a constructed grid; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.solid.is_empty()
    }

    /// Read by flat index. The caller guarantees `index < len()`.
    pub fn is_solid_at(&self, index: usize) -> bool {
        self.solid[index]
    }

    /// Flat solid mask (true = solid).
    pub fn solid_mask(&self) -> &[bool] {
        &self.solid
    }

    /// Flat void mask (true = void), the "open" input the labeler expects.
    pub fn void_mask(&self) -> Vec<bool> {
        self.solid.iter().map(|&s| !s).collect()
    }

    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|&&s| s).count()
    }

    pub fn void_count(&self) -> usize {
        self.len() - self.solid_count()
    }
}

/// Check dimensions and voxel size; returns the voxel count.
fn validate_shape(dims: Dims, voxel_size: f64) -> Result<usize> {
    if dims.nx == 0 || dims.ny == 0 || dims.nz == 0 {
        return Err(AnalysisError::EmptyDimension { dims });
    }
    let len = dims
        .checked_len()
        .ok_or(AnalysisError::DimensionTooLarge { dims })?;
    if !voxel_size.is_finite() || voxel_size <= 0.0 {
        return Err(AnalysisError::InvalidVoxelSize(voxel_size));
    }
    Ok(len)
}

fn check_data_len(dims: Dims, expected: usize, actual: usize) -> Result<()> {
    if actual != expected {
        return Err(AnalysisError::DimensionMismatch {
            dims,
            expected,
            actual,
        });
    }
    Ok(())
}
