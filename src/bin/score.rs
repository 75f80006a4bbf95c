use std::path::PathBuf;

use clap::Parser;
use resource_realms::cli::{Scenario, ScoreReport, print_report};

#[derive(Debug, Parser)]
#[command(name = "realms-score")]
#[command(about = "Score a Resource Realms table position from a JSON scenario")]
struct Args {
    /// Scenario file with `players` and an optional `config`
    path: PathBuf,

    /// Seat whose hidden points are revealed
    #[arg(long, default_value_t = 0)]
    viewer: usize,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let scenario = match Scenario::from_path(&args.path) {
        Ok(scenario) => scenario,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    let state = scenario.into_state();
    log::info!("scored scenario {} as game {}", args.path.display(), state.id);

    let report = ScoreReport::build(&state, args.viewer);
    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
        }
    } else {
        print_report(&report);
    }
}
