use day1::{count_increases, parse_depths};

use anyhow::Result;
use clap::Parser;
use tracing::info;
use util::{init_logging, read_lines, InputArgs};

/// Count how often a sonar depth measurement is deeper than the one before it.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    input: InputArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.input.verbose);

    let depths = parse_depths(read_lines(&cli.input.path)?.iter())?;
    if depths.is_empty() {
        eprintln!("No input available!");
    }

    let res = count_increases(&depths);
    info!(measurements = depths.len(), increases = res, "sweep done");

    println!("Result: {res}");

    Ok(())
}
