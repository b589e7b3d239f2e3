pub mod align;
pub mod run;
pub mod summarize;
pub mod version;

use std::path::Path;

use clap::ValueEnum;
use sirnet_epi::TimeColumn;

/// Command-line spelling of [`TimeColumn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimeColumnArg {
    /// Raw simulation time.
    Time,
    /// Time produced by an earlier alignment.
    #[value(name = "time_adj", alias = "adjusted")]
    Adjusted,
}

impl From<TimeColumnArg> for TimeColumn {
    fn from(arg: TimeColumnArg) -> Self {
        match arg {
            TimeColumnArg::Time => TimeColumn::Time,
            TimeColumnArg::Adjusted => TimeColumn::Adjusted,
        }
    }
}

/// File name of `path` as recorded in manifests.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
