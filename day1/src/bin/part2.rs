use day1::{count_window_increases, parse_depths, window_reports, SLIDING_WINDOW};

use anyhow::Result;
use clap::Parser;
use tracing::info;
use util::{init_logging, read_lines, InputArgs};

/// Count how often the sum of a three-measurement sliding window increases.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    input: InputArgs,

    /// Only print the result, not every window
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.input.verbose);

    let depths = parse_depths(read_lines(&cli.input.path)?.iter())?;
    if depths.is_empty() {
        eprintln!("No input available!");
    }

    if !cli.quiet {
        for report in window_reports(&depths, SLIDING_WINDOW)? {
            println!("{report}");
        }
    }

    let res = count_window_increases(&depths, SLIDING_WINDOW)?;
    info!(measurements = depths.len(), increases = res, "sweep done");

    println!("Result: {res}");

    Ok(())
}
