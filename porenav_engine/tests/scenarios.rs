// End-to-end scenarios for `analyze()`: synthetic structures with known
// answers, plus whole-pipeline properties checked on random grids.

use porenav_engine::{
    AnalysisConfig, Axis, Connectivity, Dims, NavigabilityReport, PercolationStatus, VoxelGrid,
    analyze, pore_statistics,
};
use proptest::prelude::*;

fn run(grid: &VoxelGrid) -> NavigabilityReport {
    analyze(grid, &AnalysisConfig::default()).unwrap()
}

/// Square tunnel of side `w` along z, centered in an `n` x `n` block.
fn square_tunnel(n: usize, w: usize, depth: usize, voxel_size: f64) -> VoxelGrid {
    let lo = ((n - w) / 2) as i32;
    let hi = lo + w as i32;
    VoxelGrid::from_fn(Dims::new(n, n, depth), voxel_size, |c| {
        !(c.x >= lo && c.x < hi && c.y >= lo && c.y < hi)
    })
    .unwrap()
}

#[test]
fn fully_void_column_is_connected_and_straight() {
    let grid = VoxelGrid::from_fn(Dims::new(3, 3, 10), 1.0, |_| false).unwrap();
    let report = run(&grid);
    assert_eq!(report.percolation_status, PercolationStatus::Connected);
    assert!((report.tortuosity_index - 1.0).abs() < 1e-12);
    assert_eq!(report.effective_porosity, 1.0);
    assert!((report.percolation_diameter_um - 3.0).abs() < 1e-9);
}

#[test]
fn fully_solid_is_blocked() {
    let grid = VoxelGrid::from_fn(Dims::new(4, 4, 4), 1.0, |_| true).unwrap();
    let report = run(&grid);
    assert_eq!(report.percolation_status, PercolationStatus::Blocked);
    assert_eq!(report.effective_porosity, 0.0);
    assert_eq!(report.percolation_diameter_um, 0.0);
    assert!(report.tortuosity_index.is_infinite());
}

#[test]
fn full_cross_section_wall_disconnects() {
    let grid = VoxelGrid::from_fn(Dims::new(5, 5, 9), 1.0, |c| c.z == 4).unwrap();
    let report = run(&grid);
    assert_eq!(report.percolation_status, PercolationStatus::Disconnected);
    assert_eq!(report.percolation_diameter_um, 0.0);
    assert!(report.tortuosity_index.is_infinite());
    assert!((report.effective_porosity - 100.0 / 225.0).abs() < 1e-12);
}

#[test]
fn straight_tunnel_diameter_matches_width() {
    let report = run(&square_tunnel(10, 4, 12, 5.0));
    assert_eq!(report.percolation_status, PercolationStatus::Connected);
    assert!((report.percolation_diameter_um - 20.0).abs() < 1e-9);
    assert!((report.tortuosity_index - 1.0).abs() < 1e-12);
}

#[test]
fn odd_tunnel_width_is_within_one_voxel() {
    let report = run(&square_tunnel(9, 3, 8, 1.0));
    assert!(report.is_connected());
    assert!((report.percolation_diameter_um - 3.0).abs() <= 1.0);
    assert!((report.tortuosity_index - 1.0).abs() < 1e-12);
}

#[test]
fn zig_zag_channel_is_tortuous() {
    // Alternating layers: a one-voxel opening at one end, then a full-width
    // corridor. Every corridor must be crossed end to end.
    //   z=0: x=0 | z=1: all | z=2: x=5 | z=3: all | z=4: x=0 | z=5: all | z=6: x=5
    let dims = Dims::new(6, 1, 7);
    let grid = VoxelGrid::from_fn(dims, 1.0, |c| match c.z % 4 {
        0 => c.x != 0,
        2 => c.x != 5,
        _ => false,
    })
    .unwrap();
    let report = run(&grid);
    assert_eq!(report.percolation_status, PercolationStatus::Connected);
    // 6 vertical hops + 3 corridors of 5 lateral hops, plus one voxel.
    let geodesic = 6.0 + 15.0 + 1.0;
    assert!((report.tortuosity_index - geodesic / 7.0).abs() < 1e-12);
    assert!(report.tortuosity_index > 1.0);
}

#[test]
fn analysis_is_idempotent() {
    let grid = square_tunnel(8, 4, 6, 0.7);
    let config = AnalysisConfig::default();
    let first = analyze(&grid, &config).unwrap();
    let second = analyze(&grid, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn sequential_and_parallel_labeling_agree() {
    let grid = VoxelGrid::from_fn(Dims::new(7, 7, 20), 1.0, |c| {
        (c.x * 3 + c.y * 5 + c.z * 7) % 11 < 3
    })
    .unwrap();
    let parallel = AnalysisConfig {
        slab_depth: 3,
        ..AnalysisConfig::default()
    };
    let sequential = AnalysisConfig {
        parallel_labeling: false,
        ..AnalysisConfig::default()
    };
    assert_eq!(
        analyze(&grid, &parallel).unwrap(),
        analyze(&grid, &sequential).unwrap()
    );
}

#[test]
fn twenty_six_connectivity_is_applied_throughout() {
    // Diagonal staircase: only connected through voxel edges.
    let grid = VoxelGrid::from_fn(Dims::new(5, 1, 5), 1.0, |c| c.x != c.z).unwrap();
    let six = run(&grid);
    assert_eq!(six.percolation_status, PercolationStatus::Disconnected);

    let config = AnalysisConfig {
        connectivity: Connectivity::TwentySix,
        ..AnalysisConfig::default()
    };
    let report = analyze(&grid, &config).unwrap();
    assert_eq!(report.percolation_status, PercolationStatus::Connected);
    let expected = (4.0 * 2.0_f64.sqrt() + 1.0) / 5.0;
    assert!((report.tortuosity_index - expected).abs() < 1e-12);
}

#[test]
fn flow_axis_can_be_x() {
    let grid = VoxelGrid::from_fn(Dims::new(10, 4, 4), 1.0, |c| {
        !((1..=2).contains(&c.y) && (1..=2).contains(&c.z))
    })
    .unwrap();
    assert_eq!(run(&grid).percolation_status, PercolationStatus::Disconnected);
    let config = AnalysisConfig {
        flow_axis: Axis::X,
        ..AnalysisConfig::default()
    };
    let report = analyze(&grid, &config).unwrap();
    assert!(report.is_connected());
    assert!((report.percolation_diameter_um - 2.0).abs() < 1e-9);
}

#[test]
fn statistics_agree_with_report() {
    let grid = square_tunnel(8, 4, 6, 2.0);
    let report = run(&grid);
    let stats = pore_statistics(&grid, &AnalysisConfig::default());
    assert_eq!(stats.component_count, 1);
    assert_eq!(stats.porosity, report.effective_porosity);
    assert_eq!(stats.interconnectivity, 1.0);
    assert!(stats.mean_pore_size_um.is_some());
}

#[test]
fn report_serializes_to_four_keys() {
    let report = run(&square_tunnel(6, 2, 4, 1.0));
    let json = serde_json::to_value(&report).unwrap();
    let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "effective_porosity",
            "percolation_diameter_um",
            "percolation_status",
            "tortuosity_index"
        ]
    );
    assert_eq!(json["percolation_status"], "Connected");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn connected_reports_are_consistent(
        cells in proptest::collection::vec(prop::bool::weighted(0.35), 6 * 6 * 8),
    ) {
        let dims = Dims::new(6, 6, 8);
        let grid = VoxelGrid::new(dims, cells, 1.5).unwrap();
        let report = run(&grid);
        prop_assert!((0.0..=1.0).contains(&report.effective_porosity));
        if report.is_connected() {
            prop_assert!(report.tortuosity_index >= 1.0 - 1e-12);
            prop_assert!(report.tortuosity_index.is_finite());
            prop_assert!(report.percolation_diameter_um > 0.0);
            prop_assert!(report.percolation_diameter_um <= 6.0 * 1.5 + 1e-9);
        } else {
            prop_assert_eq!(report.percolation_diameter_um, 0.0);
            prop_assert!(report.tortuosity_index.is_infinite());
        }
    }

    #[test]
    fn solid_faces_never_connect(
        cells in proptest::collection::vec(prop::bool::weighted(0.2), 5 * 5 * 6),
    ) {
        let dims = Dims::new(5, 5, 6);
        let grid = VoxelGrid::from_fn(dims, 1.0, |c| {
            c.z == 0 || c.z == 5 || cells[dims.index(c).unwrap()]
        })
        .unwrap();
        let report = run(&grid);
        prop_assert_ne!(report.percolation_status, PercolationStatus::Connected);
        prop_assert_eq!(report.percolation_diameter_um, 0.0);
    }
}
