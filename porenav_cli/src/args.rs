// Argument parsing for the `porenav` binary. Plain slice matching, no clap.

use porenav_engine::Dims;
use std::path::PathBuf;

/// Everything the binary needs to run one analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct CliOptions {
    pub volume: PathBuf,
    pub dims: Dims,
    pub voxel_size: f64,
    pub config: Option<PathBuf>,
    /// Also print `PoreStatistics` alongside the report.
    pub stats: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParseOutcome {
    Run(CliOptions),
    Help,
}

/// Parse `args` (without the program name).
pub fn parse_args(args: &[String]) -> Result<ParseOutcome, String> {
    let mut volume = None;
    let mut dims = None;
    let mut voxel_size = None;
    let mut config = None;
    let mut stats = false;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--dims" => {
                let values = args
                    .get(i + 1..i + 4)
                    .ok_or("--dims requires three sizes: NX NY NZ")?;
                let mut sizes = [0usize; 3];
                for (slot, raw) in sizes.iter_mut().zip(values) {
                    *slot = raw
                        .parse()
                        .map_err(|_| format!("--dims: invalid size '{raw}'"))?;
                }
                dims = Some(Dims::new(sizes[0], sizes[1], sizes[2]));
                i += 3;
            }
            "--voxel-size" => {
                i += 1;
                let raw = args.get(i).ok_or("--voxel-size requires a value")?;
                voxel_size = Some(
                    raw.parse::<f64>()
                        .map_err(|_| format!("--voxel-size: invalid number '{raw}'"))?,
                );
            }
            "--config" => {
                i += 1;
                config = Some(PathBuf::from(args.get(i).ok_or("--config requires a path")?));
            }
            "--stats" => stats = true,
            "--help" | "-h" => return Ok(ParseOutcome::Help),
            other if other.starts_with('-') => return Err(format!("Unknown argument: {other}")),
            path => {
                if volume.is_some() {
                    return Err(format!("Unexpected extra argument: {path}"));
                }
                volume = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    Ok(ParseOutcome::Run(CliOptions {
        volume: volume.ok_or("missing volume path")?,
        dims: dims.ok_or("missing --dims")?,
        voxel_size: voxel_size.ok_or("missing --voxel-size")?,
        config,
        stats,
    }))
}

pub fn usage() -> &'static str {
    "Usage: porenav <volume.raw> --dims NX NY NZ --voxel-size S [OPTIONS]

Options:
  --dims NX NY NZ      Volume dimensions in voxels (required)
  --voxel-size S       Physical edge length of one voxel (required)
  --config <FILE>      JSON analysis config (defaults for missing keys)
  --stats              Also report porosity statistics
  --help, -h           Show this help

The volume holds one byte per voxel: 0 = void, 1 = solid, x fastest."
}
