// Core types shared across the engine.
//
// Defines spatial coordinates (`VoxelCoord`), grid extents with flat-index
// arithmetic (`Dims`), the designated flow axis (`Axis`), the neighbor
// adjacency rule (`Connectivity`), and component identifiers. Everything
// that walks the lattice goes through `Dims::neighbors()` so the labeler,
// the diameter search, and the geodesic search cannot disagree about what
// "adjacent" means.
//
// Flat storage order is x fastest, then y, then z:
// `index = x + y * nx + z * nx * ny`. A z-layer is therefore one contiguous
// run of `nx * ny` entries, which the slab-parallel labeler relies on.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A position in the voxel grid, in voxel units. Signed so that neighbor
/// offsets can step off the grid and be rejected by `Dims::contains()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Component along the given axis.
    pub fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn offset(self, (dx, dy, dz): (i32, i32, i32)) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

/// One of the three grid axes. The flow axis designates the entry face
/// (index 0 along the axis) and the exit face (index n-1).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    #[default]
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The two axes orthogonal to this one.
    pub fn lateral(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::X, Axis::Z],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }
}

/// Which neighboring voxels count as adjacent.
///
/// The same rule must be used for labeling and for the geodesic search;
/// `Component` carries the rule it was labeled with so downstream steps
/// pick it up instead of taking it as a separate argument.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Connectivity {
    /// Face-sharing neighbors only.
    #[default]
    Six,
    /// Face, edge, and corner-sharing neighbors.
    TwentySix,
}

const FACE_OFFSETS: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

const fn all_offsets() -> [(i32, i32, i32); 26] {
    let mut out = [(0, 0, 0); 26];
    let mut n = 0;
    let mut dz = -1;
    while dz <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dx = -1;
            while dx <= 1 {
                if !(dx == 0 && dy == 0 && dz == 0) {
                    out[n] = (dx, dy, dz);
                    n += 1;
                }
                dx += 1;
            }
            dy += 1;
        }
        dz += 1;
    }
    out
}

const ALL_OFFSETS: [(i32, i32, i32); 26] = all_offsets();

impl Connectivity {
    /// Neighbor offsets for this adjacency rule.
    pub fn offsets(self) -> &'static [(i32, i32, i32)] {
        match self {
            Connectivity::Six => &FACE_OFFSETS,
            Connectivity::TwentySix => &ALL_OFFSETS,
        }
    }

    /// Euclidean length of a single hop along `offset`, in voxel units.
    /// Always 1.0 under 6-connectivity.
    pub fn step_length(offset: (i32, i32, i32)) -> f64 {
        match offset.0.abs() + offset.1.abs() + offset.2.abs() {
            1 => 1.0,
            2 => std::f64::consts::SQRT_2,
            _ => 3.0_f64.sqrt(),
        }
    }
}

/// Extent of a voxel grid along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dims {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl Dims {
    pub const fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self { nx, ny, nz }
    }

    /// Largest extent per axis. Coordinates are `i32`, so every index along
    /// an axis must fit in one.
    pub const MAX_EXTENT: usize = i32::MAX as usize;

    /// Total voxel count. Only valid for dims that passed `checked_len()`
    /// (every constructed `VoxelGrid` has).
    pub fn len(self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Total voxel count, or `None` if an extent exceeds `MAX_EXTENT` or
    /// the product overflows `usize`.
    pub fn checked_len(self) -> Option<usize> {
        if [self.nx, self.ny, self.nz]
            .iter()
            .any(|&n| n > Self::MAX_EXTENT)
        {
            return None;
        }
        self.nx.checked_mul(self.ny)?.checked_mul(self.nz)
    }

    pub fn is_empty(self) -> bool {
        self.nx == 0 || self.ny == 0 || self.nz == 0
    }

    pub fn extent(self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.nx,
            Axis::Y => self.ny,
            Axis::Z => self.nz,
        }
    }

    /// Number of voxels in one layer perpendicular to the z-axis.
    pub fn layer_len(self) -> usize {
        self.nx * self.ny
    }

    pub fn contains(self, coord: VoxelCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.z >= 0
            && (coord.x as usize) < self.nx
            && (coord.y as usize) < self.ny
            && (coord.z as usize) < self.nz
    }

    /// Flat index of an in-bounds coordinate. Returns `None` out of bounds.
    pub fn index(self, coord: VoxelCoord) -> Option<usize> {
        if self.contains(coord) {
            Some(
                coord.x as usize
                    + coord.y as usize * self.nx
                    + coord.z as usize * self.layer_len(),
            )
        } else {
            None
        }
    }

    /// Inverse of `index()`. The caller guarantees `index < len()`.
    pub fn coord(self, index: usize) -> VoxelCoord {
        let layer = self.layer_len();
        let z = index / layer;
        let rem = index % layer;
        VoxelCoord::new((rem % self.nx) as i32, (rem / self.nx) as i32, z as i32)
    }

    /// In-bounds neighbors of `index` under the given adjacency.
    pub fn neighbors(self, index: usize, connectivity: Connectivity) -> SmallVec<[usize; 26]> {
        let here = self.coord(index);
        connectivity
            .offsets()
            .iter()
            .filter_map(|&off| self.index(here.offset(off)))
            .collect()
    }

    /// Like `neighbors()`, but also yields the hop length in voxel units.
    pub fn weighted_neighbors(
        self,
        index: usize,
        connectivity: Connectivity,
    ) -> SmallVec<[(usize, f64); 26]> {
        let here = self.coord(index);
        connectivity
            .offsets()
            .iter()
            .filter_map(|&off| {
                self.index(here.offset(off))
                    .map(|n| (n, Connectivity::step_length(off)))
            })
            .collect()
    }

    /// Flat indices of the layer at position `layer` along `axis`.
    pub fn face_indices(self, axis: Axis, layer: usize) -> Vec<usize> {
        let mut out = Vec::new();
        match axis {
            Axis::X => {
                for z in 0..self.nz {
                    for y in 0..self.ny {
                        out.push(layer + y * self.nx + z * self.layer_len());
                    }
                }
            }
            Axis::Y => {
                for z in 0..self.nz {
                    for x in 0..self.nx {
                        out.push(x + layer * self.nx + z * self.layer_len());
                    }
                }
            }
            Axis::Z => {
                let start = layer * self.layer_len();
                out.extend(start..start + self.layer_len());
            }
        }
        out
    }

    /// Entry face (index 0 along `axis`).
    pub fn entry_face(self, axis: Axis) -> Vec<usize> {
        self.face_indices(axis, 0)
    }

    /// Exit face (index n-1 along `axis`).
    pub fn exit_face(self, axis: Axis) -> Vec<usize> {
        self.face_indices(axis, self.extent(axis).saturating_sub(1))
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.nx, self.ny, self.nz)
    }
}

/// Identifier of a connected void component. Ids are dense and assigned in
/// order of each component's first voxel in flat scan order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(pub u32);
