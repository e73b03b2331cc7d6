// Shortest path through a void cluster, from the entry face to the exit face.
//
// Multi-source search seeded with every cluster voxel on the entry face at
// distance 0. The first exit-face voxel taken off the frontier is the
// nearest one, so the search stops there.
//
// The adjacency is always the one the cluster was labeled with
// (`Component::connectivity()`); a path can never step between voxels the
// labeler considered disconnected.
//
// - 6-connectivity: every hop costs one voxel, so a plain BFS over a
//   `VecDeque` is exact.
// - 26-connectivity: hops cost 1, sqrt(2) or sqrt(3) voxels. Dijkstra with a
//   `BinaryHeap` min-heap (reversed ordering, `total_cmp` on costs).
//
// Lengths are face-to-face: the summed hop lengths plus one voxel (half a
// voxel from the entry face to the first voxel's center and half from the
// last voxel's center to the exit face). A straight axis-aligned tunnel of
// `n` layers therefore measures exactly `n` voxels.
//
// See also: `labeling.rs` for `Component`, `report.rs` which turns the
// length into a tortuosity index.

use crate::labeling::Component;
use crate::types::{Axis, Connectivity};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use tracing::debug;

/// Geodesic length (physical units) across `cluster` along `axis`, or
/// `f64::INFINITY` if no exit-face voxel is reachable from the entry face.
pub fn geodesic_length(cluster: &Component, voxel_size: f64, axis: Axis) -> f64 {
    match shortest_crossing(cluster, axis) {
        Some((length, hops)) => {
            debug!(hops, length_voxels = length, "geodesic path found");
            (length + 1.0) * voxel_size
        }
        None => f64::INFINITY,
    }
}

/// Summed hop length (voxel units, center to center) and hop count of the
/// shortest entry-to-exit path inside `cluster`.
fn shortest_crossing(cluster: &Component, axis: Axis) -> Option<(f64, usize)> {
    if cluster.is_empty() {
        return None;
    }
    let dims = cluster.dims();
    let exit_layer = dims.extent(axis) as i32 - 1;
    let is_exit = |i: usize| dims.coord(i).along(axis) == exit_layer;
    let inside = cluster.mask();
    let sources: Vec<usize> = cluster
        .indices()
        .iter()
        .copied()
        .filter(|&i| dims.coord(i).along(axis) == 0)
        .collect();

    match cluster.connectivity() {
        Connectivity::Six => bfs(cluster, &inside, &sources, is_exit)
            .map(|hops| (hops as f64, hops)),
        Connectivity::TwentySix => dijkstra(cluster, &inside, &sources, is_exit),
    }
}

/// Unit-cost search. Returns the hop count to the nearest exit voxel.
fn bfs(
    cluster: &Component,
    inside: &[bool],
    sources: &[usize],
    is_exit: impl Fn(usize) -> bool,
) -> Option<usize> {
    let dims = cluster.dims();
    let mut hops = vec![usize::MAX; dims.len()];
    let mut queue = VecDeque::with_capacity(sources.len());
    for &s in sources {
        hops[s] = 0;
        queue.push_back(s);
    }

    while let Some(current) = queue.pop_front() {
        if is_exit(current) {
            return Some(hops[current]);
        }
        let next = hops[current] + 1;
        for n in dims.neighbors(current, Connectivity::Six) {
            if inside[n] && hops[n] == usize::MAX {
                hops[n] = next;
                queue.push_back(n);
            }
        }
    }
    None
}

/// Entry in the Dijkstra open set (min-heap via reversed ordering).
struct OpenEntry {
    index: usize,
    cost: f64,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost.total_cmp(&other.cost) == Ordering::Equal && self.index == other.index
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap: smallest cost is "greatest".
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Weighted search for 26-connectivity. Returns the path length and hop
/// count to the nearest exit voxel.
fn dijkstra(
    cluster: &Component,
    inside: &[bool],
    sources: &[usize],
    is_exit: impl Fn(usize) -> bool,
) -> Option<(f64, usize)> {
    let dims = cluster.dims();
    let mut cost = vec![f64::INFINITY; dims.len()];
    let mut hops = vec![0usize; dims.len()];
    let mut closed = vec![false; dims.len()];
    let mut open = BinaryHeap::with_capacity(sources.len());
    for &s in sources {
        cost[s] = 0.0;
        open.push(OpenEntry { index: s, cost: 0.0 });
    }

    while let Some(OpenEntry { index, cost: c }) = open.pop() {
        if closed[index] {
            continue;
        }
        closed[index] = true;
        if is_exit(index) {
            return Some((c, hops[index]));
        }
        for (n, step) in dims.weighted_neighbors(index, Connectivity::TwentySix) {
            if !inside[n] || closed[n] {
                continue;
            }
            let tentative = c + step;
            if tentative < cost[n] {
                cost[n] = tentative;
                hops[n] = hops[index] + 1;
                open.push(OpenEntry {
                    index: n,
                    cost: tentative,
                });
            }
        }
    }
    None
}

/// Straight-line distance between the entry and exit faces along `axis`,
/// measured face to face, in voxel units. Lower bound for any crossing.
pub fn straight_line_voxels(cluster: &Component, axis: Axis) -> f64 {
    cluster.dims().extent(axis) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::grid::VoxelGrid;
    use crate::percolation::detect;
    use crate::types::Dims;

    fn cluster_of(grid: &VoxelGrid, connectivity: Connectivity, axis: Axis) -> Component {
        let config = AnalysisConfig {
            connectivity,
            flow_axis: axis,
            ..AnalysisConfig::default()
        };
        detect(grid, &config).main_cluster.unwrap()
    }

    #[test]
    fn straight_tunnel_is_face_to_face_length() {
        let grid =
            VoxelGrid::from_fn(Dims::new(3, 3, 10), 0.5, |c| !(c.x == 1 && c.y == 1)).unwrap();
        let cluster = cluster_of(&grid, Connectivity::Six, Axis::Z);
        assert_eq!(geodesic_length(&cluster, 0.5, Axis::Z), 5.0);
        assert_eq!(straight_line_voxels(&cluster, Axis::Z), 10.0);
    }

    /// z=0: x=0 | z=1: corridor | z=2: x=3 | z=3: corridor | z=4: x=0
    fn zig_zag() -> VoxelGrid {
        VoxelGrid::from_fn(Dims::new(4, 1, 5), 1.0, |c| match c.z {
            0 | 4 => c.x != 0,
            2 => c.x != 3,
            _ => false,
        })
        .unwrap()
    }

    #[test]
    fn zig_zag_channel_counts_lateral_hops() {
        let cluster = cluster_of(&zig_zag(), Connectivity::Six, Axis::Z);
        // 10 hops plus one voxel face-to-face.
        assert_eq!(geodesic_length(&cluster, 1.0, Axis::Z), 11.0);
    }

    #[test]
    fn unreachable_exit_is_infinite() {
        let grid = VoxelGrid::from_fn(Dims::new(3, 3, 6), 1.0, |c| c.z == 3).unwrap();
        let cluster = cluster_of(&grid, Connectivity::Six, Axis::Z);
        assert!(!cluster.spans(Axis::Z));
        assert_eq!(geodesic_length(&cluster, 1.0, Axis::Z), f64::INFINITY);
    }

    #[test]
    fn diagonal_staircase_uses_weighted_hops() {
        let dims = Dims::new(4, 1, 4);
        let grid = VoxelGrid::from_fn(dims, 1.0, |c| c.x != c.z).unwrap();
        let cluster = cluster_of(&grid, Connectivity::TwentySix, Axis::Z);
        let expected = 3.0 * 2.0_f64.sqrt() + 1.0;
        assert!((geodesic_length(&cluster, 1.0, Axis::Z) - expected).abs() < 1e-12);
    }

    #[test]
    fn twenty_six_never_longer_than_six() {
        let grid = zig_zag();
        let six = cluster_of(&grid, Connectivity::Six, Axis::Z);
        let twenty_six = cluster_of(&grid, Connectivity::TwentySix, Axis::Z);
        let a = geodesic_length(&six, 1.0, Axis::Z);
        let b = geodesic_length(&twenty_six, 1.0, Axis::Z);
        assert_eq!(a, 11.0);
        assert!(b < a);
        assert!(b >= straight_line_voxels(&twenty_six, Axis::Z));
    }

    #[test]
    fn search_follows_cluster_connectivity() {
        // The staircase is one cluster under 26-connectivity. Searching it
        // with the cluster's own rule must find the diagonal path; a
        // face-only search over the same voxels would find nothing.
        let dims = Dims::new(4, 1, 4);
        let grid = VoxelGrid::from_fn(dims, 1.0, |c| c.x != c.z).unwrap();
        let cluster = cluster_of(&grid, Connectivity::TwentySix, Axis::Z);
        assert_eq!(cluster.connectivity(), Connectivity::TwentySix);
        assert!(geodesic_length(&cluster, 1.0, Axis::Z).is_finite());
        let six = cluster_of(&grid, Connectivity::Six, Axis::Z);
        assert_eq!(six.size(), 1);
        assert_eq!(geodesic_length(&six, 1.0, Axis::Z), f64::INFINITY);
    }

    #[test]
    fn flow_along_x() {
        let grid =
            VoxelGrid::from_fn(Dims::new(7, 3, 3), 2.0, |c| !(c.y == 1 && c.z == 1)).unwrap();
        let cluster = cluster_of(&grid, Connectivity::Six, Axis::X);
        assert_eq!(geodesic_length(&cluster, 2.0, Axis::X), 14.0);
    }
}
