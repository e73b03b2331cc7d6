// CLI entry point: `porenav`.
//
// Analyzes one raw voxel volume and prints the navigability report as JSON
// on stdout. Logging goes to stderr through `tracing-subscriber`; set
// `RUST_LOG` to override the default `porenav=info` filter (for example
// `RUST_LOG=porenav_engine=debug` to see each phase).
//
// Usage:
//   porenav <volume.raw> --dims NX NY NZ --voxel-size S [OPTIONS]
//     --config <FILE>    JSON analysis config
//     --stats            Also report porosity statistics

use porenav_cli::args::usage;
use porenav_cli::{ParseOutcome, parse_args, run};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("porenav=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(ParseOutcome::Run(options)) => options,
        Ok(ParseOutcome::Help) => {
            println!("{}", usage());
            return;
        }
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{}", usage());
            std::process::exit(1);
        }
    };

    match run(&options) {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Failed to render output: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Analysis failed: {e}");
            std::process::exit(1);
        }
    }
}
