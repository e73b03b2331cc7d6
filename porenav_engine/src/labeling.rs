// Connected-component labeling of open (void) voxels.
//
// Partitions every open voxel of a flat mask into maximal connected
// components under a fixed `Connectivity`. Two implementations produce
// bit-identical output:
//
// - `label_components()`: single-threaded iterative flood fill with an
//   explicit stack. Component ids are assigned in the order each
//   component's first voxel appears in flat scan order.
// - `label_components_parallel()`: splits the grid into z-slabs (contiguous
//   runs of layers in flat storage), labels each slab independently on the
//   rayon pool, unions provisional labels across each slab boundary, and
//   then renumbers roots in flat scan order so the ids match the sequential
//   labeler exactly.
//
// The mask is generic ("open" = may be traversed) so the same code labels
// the whole void space for percolation detection and the radius-restricted
// masks tested by the diameter search.
//
// See also: `percolation.rs` (largest component + face test),
// `diameter.rs` (relabels restricted masks), `geodesic.rs` (walks a
// `Component` with the connectivity recorded here).

use crate::types::{Axis, ComponentId, Connectivity, Dims};
use rayon::prelude::*;
use rustc_hash::FxHashMap;

const NO_LABEL: u32 = u32::MAX;

/// Result of labeling a mask: one component id per open voxel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentLabels {
    dims: Dims,
    connectivity: Connectivity,
    /// Per-voxel label, `NO_LABEL` for closed voxels.
    labels: Vec<u32>,
    /// Voxel count per component, indexed by id.
    sizes: Vec<usize>,
}

/// One maximal connected cluster of open voxels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    id: ComponentId,
    dims: Dims,
    connectivity: Connectivity,
    /// Flat indices of the member voxels, ascending.
    indices: Vec<usize>,
}

impl ComponentLabels {
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Number of components.
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Component containing the voxel at `index`, or `None` if it is closed.
    pub fn label(&self, index: usize) -> Option<ComponentId> {
        match self.labels[index] {
            NO_LABEL => None,
            l => Some(ComponentId(l)),
        }
    }

    pub fn size(&self, id: ComponentId) -> usize {
        self.sizes[id.0 as usize]
    }

    /// Total number of labeled voxels.
    pub fn labeled_count(&self) -> usize {
        self.sizes.iter().sum()
    }

    /// The component with the most voxels. Ties go to the lowest id, i.e. the
    /// component whose first voxel comes earliest in scan order.
    pub fn largest(&self) -> Option<ComponentId> {
        let mut best: Option<(usize, usize)> = None;
        for (id, &size) in self.sizes.iter().enumerate() {
            if best.is_none_or(|(_, best_size)| size > best_size) {
                best = Some((id, size));
            }
        }
        best.map(|(id, _)| ComponentId(id as u32))
    }

    /// Extract a component's member set.
    pub fn component(&self, id: ComponentId) -> Component {
        let mut indices = Vec::with_capacity(self.size(id));
        indices.extend(
            self.labels
                .iter()
                .enumerate()
                .filter(|&(_, &l)| l == id.0)
                .map(|(i, _)| i),
        );
        Component {
            id,
            dims: self.dims,
            connectivity: self.connectivity,
            indices,
        }
    }

    /// Components that contain at least one voxel on the entry face AND at
    /// least one on the exit face of `axis`. Only the two face layers are
    /// scanned.
    pub fn spanning_components(&self, axis: Axis) -> Vec<ComponentId> {
        let mut on_entry = vec![false; self.count()];
        for i in self.dims.entry_face(axis) {
            if let Some(id) = self.label(i) {
                on_entry[id.0 as usize] = true;
            }
        }
        let mut spanning = vec![false; self.count()];
        for i in self.dims.exit_face(axis) {
            if let Some(id) = self.label(i) {
                if on_entry[id.0 as usize] {
                    spanning[id.0 as usize] = true;
                }
            }
        }
        spanning
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s)
            .map(|(id, _)| ComponentId(id as u32))
            .collect()
    }

    /// Whether any single component connects the two faces of `axis`.
    pub fn any_spanning(&self, axis: Axis) -> bool {
        !self.spanning_components(axis).is_empty()
    }
}

impl Component {
    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// The adjacency rule this component was labeled with.
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn size(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Dense membership mask over the whole grid.
    pub fn mask(&self) -> Vec<bool> {
        let mut mask = vec![false; self.dims.len()];
        for &i in &self.indices {
            mask[i] = true;
        }
        mask
    }

    /// Does any member lie in layer `layer` along `axis`?
    pub fn touches_layer(&self, axis: Axis, layer: usize) -> bool {
        self.indices
            .iter()
            .any(|&i| self.dims.coord(i).along(axis) as usize == layer)
    }

    /// Does the component reach both the entry and the exit face of `axis`?
    pub fn spans(&self, axis: Axis) -> bool {
        let last = self.dims.extent(axis) - 1;
        self.touches_layer(axis, 0) && self.touches_layer(axis, last)
    }
}

// ---------------------------------------------------------------------------
// Sequential labeling
// ---------------------------------------------------------------------------

/// Label the open voxels of `open` (flat, `dims.len()` entries) with an
/// explicit-stack flood fill. O(N) in voxel count.
pub fn label_components(dims: Dims, open: &[bool], connectivity: Connectivity) -> ComponentLabels {
    debug_assert_eq!(open.len(), dims.len());
    let (labels, count) = flood_fill_labels(dims, open, connectivity);
    let mut sizes = vec![0usize; count];
    for &l in &labels {
        if l != NO_LABEL {
            sizes[l as usize] += 1;
        }
    }
    ComponentLabels {
        dims,
        connectivity,
        labels,
        sizes,
    }
}

/// Core flood fill: returns raw labels and the number of components.
fn flood_fill_labels(dims: Dims, open: &[bool], connectivity: Connectivity) -> (Vec<u32>, usize) {
    let mut labels = vec![NO_LABEL; open.len()];
    let mut next: u32 = 0;
    let mut stack = Vec::new();

    for seed in 0..open.len() {
        if !open[seed] || labels[seed] != NO_LABEL {
            continue;
        }
        labels[seed] = next;
        stack.push(seed);
        while let Some(current) = stack.pop() {
            for n in dims.neighbors(current, connectivity) {
                if open[n] && labels[n] == NO_LABEL {
                    labels[n] = next;
                    stack.push(n);
                }
            }
        }
        next += 1;
    }

    (labels, next as usize)
}

// ---------------------------------------------------------------------------
// Slab-parallel labeling
// ---------------------------------------------------------------------------

/// Label `open` by z-slabs of `slab_depth` layers in parallel, then merge.
/// Produces exactly the same `ComponentLabels` as `label_components()`.
pub fn label_components_parallel(
    dims: Dims,
    open: &[bool],
    connectivity: Connectivity,
    slab_depth: usize,
) -> ComponentLabels {
    debug_assert_eq!(open.len(), dims.len());
    let layer = dims.layer_len();
    let slab_depth = slab_depth.max(1);
    let slab_len = layer.saturating_mul(slab_depth);
    if open.len() <= slab_len {
        return label_components(dims, open, connectivity);
    }

    // Pass 1: independent flood fill per slab.
    let slabs: Vec<(Vec<u32>, usize)> = open
        .par_chunks(slab_len)
        .map(|chunk| {
            let slab_dims = Dims::new(dims.nx, dims.ny, chunk.len() / layer);
            flood_fill_labels(slab_dims, chunk, connectivity)
        })
        .collect();

    // Provisional global labels: slab-local label + running offset.
    let mut provisional = Vec::with_capacity(open.len());
    let mut offset = 0u32;
    for (local, count) in &slabs {
        provisional.extend(
            local
                .iter()
                .map(|&l| if l == NO_LABEL { NO_LABEL } else { l + offset }),
        );
        offset += *count as u32;
    }

    // Pass 2: union labels that touch across each slab boundary. Only
    // offsets that step +1 in z can cross from the top layer of one slab
    // into the bottom layer of the next.
    let mut forest = UnionFind::new(offset as usize);
    let crossing: Vec<(i32, i32, i32)> = connectivity
        .offsets()
        .iter()
        .copied()
        .filter(|&(_, _, dz)| dz == 1)
        .collect();
    let slab_count = slabs.len();
    for s in 0..slab_count - 1 {
        let top_layer = (s + 1) * slab_depth - 1;
        let start = top_layer * layer;
        for i in start..start + layer {
            let a = provisional[i];
            if a == NO_LABEL {
                continue;
            }
            let here = dims.coord(i);
            for &off in &crossing {
                if let Some(n) = dims.index(here.offset(off)) {
                    let b = provisional[n];
                    if b != NO_LABEL {
                        forest.union(a, b);
                    }
                }
            }
        }
    }

    // Pass 3: renumber roots in flat scan order.
    let mut canonical: FxHashMap<u32, u32> = FxHashMap::default();
    let mut sizes: Vec<usize> = Vec::new();
    let labels = provisional
        .iter()
        .map(|&p| {
            if p == NO_LABEL {
                return NO_LABEL;
            }
            let root = forest.find(p);
            let id = *canonical.entry(root).or_insert_with(|| {
                sizes.push(0);
                (sizes.len() - 1) as u32
            });
            sizes[id as usize] += 1;
            id
        })
        .collect();

    ComponentLabels {
        dims,
        connectivity,
        labels,
        sizes,
    }
}

/// Disjoint-set forest over provisional labels (path halving, union by
/// smaller root).
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
        }
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grandparent = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grandparent;
            x = grandparent;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        let (keep, absorb) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[absorb as usize] = keep;
    }
}
