// Integration test for the CLI library path: write a raw volume to a temp
// file, parse a command line pointing at it, and check the JSON output.
//
// The binary itself only adds the tracing subscriber and exit codes on top
// of `parse_args()` + `run()`.

use std::path::PathBuf;

use porenav_cli::{ParseOutcome, parse_args, run};

/// Helper: write `bytes` to a uniquely named file in the temp dir.
fn temp_file(name: &str, bytes: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("porenav-{}-{name}", std::process::id()));
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Helper: 4x4x6 volume with a 2x2 tunnel along z.
fn tunnel_volume() -> Vec<u8> {
    let mut bytes = Vec::with_capacity(4 * 4 * 6);
    for _z in 0..6 {
        for y in 0..4 {
            for x in 0..4 {
                let open = (1..=2).contains(&x) && (1..=2).contains(&y);
                bytes.push(if open { 0 } else { 1 });
            }
        }
    }
    bytes
}

fn options_for(args: &[&str]) -> porenav_cli::CliOptions {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    match parse_args(&args).unwrap() {
        ParseOutcome::Run(options) => options,
        ParseOutcome::Help => panic!("unexpected help"),
    }
}

#[test]
fn tunnel_volume_reports_connected() {
    let volume = temp_file("tunnel.raw", &tunnel_volume());
    let options = options_for(&[
        volume.to_str().unwrap(),
        "--dims",
        "4",
        "4",
        "6",
        "--voxel-size",
        "3",
    ]);

    let output = run(&options).unwrap();
    assert_eq!(output["percolation_status"], "Connected");
    assert_eq!(output["percolation_diameter_um"], 6.0);
    assert_eq!(output["tortuosity_index"], 1.0);
    assert_eq!(output["effective_porosity"], 0.25);

    std::fs::remove_file(volume).unwrap();
}

#[test]
fn stats_and_config_are_applied() {
    let volume = temp_file("stats.raw", &tunnel_volume());
    let config = temp_file("config.json", br#"{ "flow_axis": "X" }"#);
    let options = options_for(&[
        volume.to_str().unwrap(),
        "--dims",
        "4",
        "4",
        "6",
        "--voxel-size",
        "1",
        "--config",
        config.to_str().unwrap(),
        "--stats",
    ]);

    let output = run(&options).unwrap();
    // The tunnel runs along z, so it cannot cross along x.
    assert_eq!(output["report"]["percolation_status"], "Disconnected");
    assert!(output["report"]["tortuosity_index"].is_null());
    assert_eq!(output["statistics"]["porosity"], 0.25);
    assert_eq!(output["statistics"]["component_count"], 1);

    std::fs::remove_file(volume).unwrap();
    std::fs::remove_file(config).unwrap();
}

#[test]
fn wrong_volume_size_is_an_error() {
    let volume = temp_file("short.raw", &[0u8; 10]);
    let options = options_for(&[
        volume.to_str().unwrap(),
        "--dims",
        "4",
        "4",
        "6",
        "--voxel-size",
        "1",
    ]);
    let err = run(&options).unwrap_err();
    assert!(err.to_string().contains("96"), "unexpected error: {err}");
    std::fs::remove_file(volume).unwrap();
}

#[test]
fn missing_file_is_an_io_error() {
    let options = options_for(&[
        "/nonexistent/porenav/volume.raw",
        "--dims",
        "1",
        "1",
        "1",
        "--voxel-size",
        "1",
    ]);
    assert!(matches!(
        run(&options),
        Err(porenav_engine::AnalysisError::Io(_))
    ));
}
