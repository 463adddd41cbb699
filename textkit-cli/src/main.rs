//! textkit command-line entry point

use clap::Parser;
use textkit_cli::commands::Commands;
use textkit_cli::CliResult;

/// Word-aligned windows, excerpts and statistics over text files
#[derive(Debug, Parser)]
#[command(name = "textkit", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
