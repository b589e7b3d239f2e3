use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    align::{self, AlignArgs},
    run::{self, RunArgs},
    summarize::{self, SummarizeArgs},
    version::{self, VersionArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "sirnet", about = "Stochastic SIR epidemics on contact networks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate one or more runs of a plan on a contact network.
    Run(RunArgs),
    /// Re-zero the time column of an exported series on a threshold.
    Align(AlignArgs),
    /// Print headline numbers for exported series.
    Summarize(SummarizeArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,sirnet=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run::run(&args),
        Command::Align(args) => align::run(&args),
        Command::Summarize(args) => summarize::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
