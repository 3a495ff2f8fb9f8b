mod scenario;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use scenario::Scenario;

#[derive(Debug, Parser)]
#[command(
    name = "overlay-drag-harness",
    version,
    about = "Replay a pointer script against an overlay tree and print the final drag offsets"
)]
struct Args {
    /// Scenario file (JSON)
    scenario: PathBuf,

    /// Log drag decisions to stderr
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match run(&args) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("overlay-drag-harness: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String, String> {
    let text = std::fs::read_to_string(&args.scenario)
        .map_err(|e| format!("{}: {e}", args.scenario.display()))?;
    let report = Scenario::from_json(&text)?.run()?;
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };
    json.map_err(|e| format!("failed to encode report: {e}"))
}
