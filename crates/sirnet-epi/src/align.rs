use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use sirnet_core::errors::{ErrorInfo, SirError};
use sirnet_core::Status;

use crate::series::{CompartmentSnapshot, OutputSeries};

/// Time column an alignment shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeColumn {
    /// Raw simulation time.
    #[default]
    #[serde(rename = "time")]
    Time,
    /// Time produced by an earlier alignment.
    #[serde(rename = "time_adj")]
    Adjusted,
}

impl TimeColumn {
    /// Column header used in tabular exports.
    pub fn header(&self) -> &'static str {
        match self {
            TimeColumn::Time => "time",
            TimeColumn::Adjusted => "time_adj",
        }
    }
}

impl fmt::Display for TimeColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Tabular view of a series that can be aligned.
pub trait TimeTable {
    /// The underlying compartment snapshots.
    fn series(&self) -> &OutputSeries;

    /// Values of a time column, or `None` if the table lacks it.
    fn time_column(&self, column: TimeColumn) -> Option<Cow<'_, [f64]>>;
}

impl TimeTable for OutputSeries {
    fn series(&self) -> &OutputSeries {
        self
    }

    fn time_column(&self, column: TimeColumn) -> Option<Cow<'_, [f64]>> {
        match column {
            TimeColumn::Time => Some(Cow::Owned(self.times())),
            TimeColumn::Adjusted => None,
        }
    }
}

/// Output series with an extra `time_adj` column zeroed on a threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedOutputSeries {
    series: OutputSeries,
    offset: f64,
    adjusted: Vec<f64>,
}

impl AlignedOutputSeries {
    pub(crate) fn from_parts(series: OutputSeries, offset: f64, adjusted: Vec<f64>) -> Self {
        Self {
            series,
            offset,
            adjusted,
        }
    }

    /// Amount subtracted from the aligned time column.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The `time_adj` column.
    pub fn adjusted_times(&self) -> &[f64] {
        &self.adjusted
    }

    /// The unshifted series.
    pub fn series(&self) -> &OutputSeries {
        &self.series
    }

    /// Drops the adjusted column.
    pub fn into_series(self) -> OutputSeries {
        self.series
    }

    /// Iterates over `(snapshot, adjusted_time)` rows.
    pub fn rows(&self) -> impl Iterator<Item = (&CompartmentSnapshot, f64)> + '_ {
        self.series.iter().zip(self.adjusted.iter().copied())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.adjusted.len()
    }

    /// Whether the series has no rows.
    pub fn is_empty(&self) -> bool {
        self.adjusted.is_empty()
    }
}

impl TimeTable for AlignedOutputSeries {
    fn series(&self) -> &OutputSeries {
        &self.series
    }

    fn time_column(&self, column: TimeColumn) -> Option<Cow<'_, [f64]>> {
        match column {
            TimeColumn::Time => Some(Cow::Owned(self.series.times())),
            TimeColumn::Adjusted => Some(Cow::Borrowed(&self.adjusted)),
        }
    }
}

/// Re-zeroes `time_column` at the earliest row where `criterion` reaches
/// `threshold`.
///
/// Rows before the threshold get negative adjusted times. Fails with
/// [`SirError::ThresholdNeverReached`] when no row qualifies.
pub fn align<T: TimeTable + ?Sized>(
    table: &T,
    threshold: usize,
    criterion: Status,
    time_column: TimeColumn,
) -> Result<AlignedOutputSeries, SirError> {
    let Some(times) = table.time_column(time_column) else {
        return Err(SirError::InvalidConfiguration(
            ErrorInfo::new("missing-time-column", "series has no such time column")
                .with_context("column", time_column.header()),
        ));
    };
    let series = table.series();

    let offset = series
        .iter()
        .zip(times.iter())
        .filter(|(row, _)| row.count(criterion) >= threshold)
        .map(|(_, time)| *time)
        .min_by(f64::total_cmp);
    let Some(offset) = offset else {
        let observed = series.column(criterion).into_iter().max().unwrap_or(0);
        return Err(SirError::ThresholdNeverReached(
            ErrorInfo::new("threshold-never-reached", "no snapshot reaches the threshold")
                .with_context("criterion", criterion.to_string())
                .with_context("threshold", threshold.to_string())
                .with_context("max_observed", observed.to_string()),
        ));
    };

    let adjusted = times.iter().map(|time| time - offset).collect();
    Ok(AlignedOutputSeries::from_parts(
        series.clone(),
        offset,
        adjusted,
    ))
}
