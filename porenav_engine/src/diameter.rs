// Percolation diameter: the widest sphere that can cross the sample.
//
// For a clearance radius `r`, the restricted mask is
// `M_r = { v in main cluster : distance(v) >= r }`. The percolation radius is
// the largest `r` for which some component of `M_r` still touches both the
// entry and the exit face. `M_r` only shrinks as `r` grows, so the
// "spans both faces" predicate is monotone non-increasing in `r` and can be
// bisected.
//
// Search procedure:
// 1. Upper bound = min(largest distance in the cluster, lateral cap). The
//    lateral cap is half the smaller extent across the flow axis; it keeps
//    the bound finite on a 100% void grid, where every distance is infinite.
// 2. If the upper bound itself spans, it is the answer.
// 3. Otherwise bisect on [0, upper] until the interval is narrower than
//    `diameter_tolerance` (voxel units).
// 4. Snap to the largest distance value present in the cluster that lies in
//    the final [lo, hi) window and still spans. `M_r` only changes at those
//    values, so the result lands exactly on grid-aligned geometry.
//
// Each spanning check relabels only the restricted mask, with the connectivity the
// main cluster was labeled with.
//
// See also: `distance.rs` for the field being thresholded, `labeling.rs`
// for the face-spanning test.

use crate::config::AnalysisConfig;
use crate::distance::DistanceField;
use crate::labeling::Component;
use crate::percolation::label_with;
use crate::types::{Axis, Dims};
use tracing::debug;

/// Percolation diameter in physical units: `2 * r * voxel_size`.
pub fn percolation_diameter(
    cluster: &Component,
    field: &DistanceField,
    voxel_size: f64,
    config: &AnalysisConfig,
) -> f64 {
    2.0 * max_clearance_radius(cluster, field, config) * voxel_size
}

/// Half the smaller grid extent orthogonal to `axis`, in voxel units.
pub fn lateral_radius_cap(dims: Dims, axis: Axis) -> f64 {
    let [a, b] = axis.lateral();
    dims.extent(a).min(dims.extent(b)) as f64 / 2.0
}

/// Does the restricted mask `M_r` of `cluster` contain a component that
/// touches both faces of the flow axis?
pub fn spans_at_radius(
    cluster: &Component,
    field: &DistanceField,
    radius: f64,
    config: &AnalysisConfig,
) -> bool {
    let dims = cluster.dims();
    let mut open = vec![false; dims.len()];
    for &i in cluster.indices() {
        if field.get(i) >= radius {
            open[i] = true;
        }
    }
    label_with(dims, &open, cluster.connectivity(), config).any_spanning(config.flow_axis)
}

/// Largest clearance radius (voxel units) that still spans the sample.
/// Returns 0.0 for an empty or non-spanning cluster.
pub fn max_clearance_radius(
    cluster: &Component,
    field: &DistanceField,
    config: &AnalysisConfig,
) -> f64 {
    if cluster.is_empty() {
        return 0.0;
    }

    debug_assert_eq!(field.dims(), cluster.dims());

    // Infinite distances (no solid anywhere) are left to the lateral cap.
    let mut levels: Vec<f64> = cluster
        .indices()
        .iter()
        .map(|&i| field.get(i))
        .filter(|d| d.is_finite())
        .collect();
    levels.sort_by(f64::total_cmp);
    levels.dedup();

    let largest = field.max_over(&cluster.mask()).unwrap_or(0.0);
    let cap = lateral_radius_cap(cluster.dims(), config.flow_axis);
    let mut hi = largest.min(cap);

    if spans_at_radius(cluster, field, hi, config) {
        debug!(radius = hi, "clearance radius limited by upper bound");
        return hi;
    }
    if !spans_at_radius(cluster, field, 0.0, config) {
        return 0.0;
    }

    let mut lo = 0.0;
    let mut checks = 0u32;
    while hi - lo > config.diameter_tolerance {
        let mid = 0.5 * (lo + hi);
        if spans_at_radius(cluster, field, mid, config) {
            lo = mid;
        } else {
            hi = mid;
        }
        checks += 1;
    }

    // The true threshold is a distance level in [lo, hi). The lowest such
    // level has the same M_r as `lo`, so it always spans; test the others
    // from the top down.
    let first = levels.partition_point(|&v| v < lo);
    let last = levels.partition_point(|&v| v < hi);
    let window = &levels[first..last];
    if let Some((&lowest, rest)) = window.split_first() {
        lo = rest
            .iter()
            .rev()
            .copied()
            .find(|&level| {
                checks += 1;
                spans_at_radius(cluster, field, level, config)
            })
            .unwrap_or(lowest);
    }

    debug!(radius = lo, checks, "clearance radius bisected");
    lo
}
