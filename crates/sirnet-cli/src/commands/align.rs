use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use sirnet_core::Status;
use sirnet_epi::align;
use sirnet_epi::export::{load_series_csv, save_aligned_csv};
use tracing::info;

use super::TimeColumnArg;

#[derive(Args, Debug)]
pub struct AlignArgs {
    /// Series CSV written by `sirnet run` or an earlier `sirnet align`.
    #[arg(long)]
    pub input: PathBuf,
    /// Count the criterion compartment must reach.
    #[arg(long)]
    pub threshold: usize,
    /// Compartment compared against the threshold (S, I or R).
    #[arg(long, default_value = "infected")]
    pub criterion: Status,
    /// Time column to shift.
    #[arg(long, value_enum, default_value = "time")]
    pub time_column: TimeColumnArg,
    /// Destination CSV with the added `time_adj` column.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &AlignArgs) -> Result<(), Box<dyn Error>> {
    let loaded = load_series_csv(&args.input)?;
    let aligned = align(
        &loaded,
        args.threshold,
        args.criterion,
        args.time_column.into(),
    )?;
    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    save_aligned_csv(&aligned, &args.out)?;
    info!(
        input = %args.input.display(),
        out = %args.out.display(),
        offset = aligned.offset(),
        "aligned series"
    );
    println!("{}", aligned.offset());
    Ok(())
}
