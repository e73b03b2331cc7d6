// porenav_cli — command-line front end for `porenav_engine`.
//
// Reads a raw binary volume (one byte per voxel, 0 = void, 1 = solid, x
// fastest then y then z), runs the navigability analysis, and renders the
// report as pretty JSON. All of the actual analysis lives in the engine;
// this crate only owns argument parsing and file loading.
//
// Module overview:
// - `args.rs`: hand-rolled argument parsing into `CliOptions`.
// - `run.rs`:  load volume + config, analyze, build the JSON output.
//
// The binary (`main.rs`) installs the tracing subscriber and maps errors to
// exit code 1; the library API is what the integration tests drive.

pub mod args;
pub mod run;

pub use args::{CliOptions, ParseOutcome, parse_args};
pub use run::run;
