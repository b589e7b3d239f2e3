use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use sirnet_epi::export::{load_series_csv, to_json_bytes};
use sirnet_epi::SeriesSummary;

use super::display_name;

#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// One or more series CSV files.
    #[arg(long = "input", required = true, value_name = "PATH")]
    pub inputs: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SummaryEntry {
    file: String,
    #[serde(flatten)]
    summary: SeriesSummary,
    attack_rate: f64,
}

pub fn run(args: &SummarizeArgs) -> Result<(), Box<dyn Error>> {
    let mut entries = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        let loaded = load_series_csv(path)?;
        let summary = SeriesSummary::from_series(loaded.output());
        entries.push(SummaryEntry {
            file: display_name(path),
            attack_rate: summary.attack_rate(),
            summary,
        });
    }
    let json = to_json_bytes(&entries)?;
    print!("{}", String::from_utf8(json)?);
    Ok(())
}
