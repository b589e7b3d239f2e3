use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sirnet_core::errors::{ErrorInfo, SirError};

use crate::align::{AlignedOutputSeries, TimeColumn, TimeTable};
use crate::series::{CompartmentSnapshot, OutputSeries};

/// Header row of a plain series export.
pub const SERIES_HEADERS: [&str; 4] = ["time", "Susceptible", "Infected", "Recovered"];

/// Header row of an aligned series export.
pub const ALIGNED_HEADERS: [&str; 5] = [
    "time",
    "Susceptible",
    "Infected",
    "Recovered",
    "time_adj",
];

/// A series read back from CSV, with or without an adjusted time column.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedSeries {
    /// Columns `time, Susceptible, Infected, Recovered`.
    Plain(OutputSeries),
    /// The plain columns plus `time_adj`.
    Aligned(AlignedOutputSeries),
}

impl LoadedSeries {
    /// The compartment snapshots regardless of alignment.
    pub fn output(&self) -> &OutputSeries {
        match self {
            LoadedSeries::Plain(series) => series,
            LoadedSeries::Aligned(aligned) => aligned.series(),
        }
    }
}

impl TimeTable for LoadedSeries {
    fn series(&self) -> &OutputSeries {
        self.output()
    }

    fn time_column(&self, column: TimeColumn) -> Option<Cow<'_, [f64]>> {
        match self {
            LoadedSeries::Plain(series) => series.time_column(column),
            LoadedSeries::Aligned(aligned) => aligned.time_column(column),
        }
    }
}

/// Writes `series` as CSV.
pub fn write_series_csv<W: Write>(series: &OutputSeries, writer: W) -> Result<(), SirError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(SERIES_HEADERS).map_err(csv_error)?;
    for row in series {
        wtr.write_record(snapshot_fields(row)).map_err(csv_error)?;
    }
    wtr.flush()
        .map_err(|err| SirError::Serde(ErrorInfo::new("csv-flush", err.to_string())))
}

/// Writes `aligned` as CSV with a trailing `time_adj` column.
pub fn write_aligned_csv<W: Write>(
    aligned: &AlignedOutputSeries,
    writer: W,
) -> Result<(), SirError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(ALIGNED_HEADERS).map_err(csv_error)?;
    for (row, adjusted) in aligned.rows() {
        let [time, s, i, r] = snapshot_fields(row);
        wtr.write_record([time, s, i, r, adjusted.to_string()])
            .map_err(csv_error)?;
    }
    wtr.flush()
        .map_err(|err| SirError::Serde(ErrorInfo::new("csv-flush", err.to_string())))
}

/// Writes `series` to a CSV file.
pub fn save_series_csv(series: &OutputSeries, path: &Path) -> Result<(), SirError> {
    write_series_csv(series, create(path)?).map_err(|err| with_path(err, path))
}

/// Writes `aligned` to a CSV file.
pub fn save_aligned_csv(aligned: &AlignedOutputSeries, path: &Path) -> Result<(), SirError> {
    write_aligned_csv(aligned, create(path)?).map_err(|err| with_path(err, path))
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    time: f64,
    #[serde(rename = "Susceptible")]
    susceptible: usize,
    #[serde(rename = "Infected")]
    infected: usize,
    #[serde(rename = "Recovered")]
    recovered: usize,
    #[serde(default)]
    time_adj: Option<f64>,
}

/// Reads a series previously written by this module (or any CSV with the
/// same headers; extra columns are ignored).
pub fn read_series_csv<R: Read>(reader: R) -> Result<LoadedSeries, SirError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut snapshots = Vec::new();
    let mut adjusted = Vec::new();
    for (line, record) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = record.map_err(|err| {
            SirError::Serde(
                ErrorInfo::new("csv-read", err.to_string()).with_context("row", line.to_string()),
            )
        })?;
        snapshots.push(CompartmentSnapshot::new(
            row.time,
            row.susceptible,
            row.infected,
            row.recovered,
        ));
        adjusted.push(row.time_adj);
    }
    let series = OutputSeries::from_snapshots(snapshots)?;
    if adjusted.iter().all(Option::is_none) {
        return Ok(LoadedSeries::Plain(series));
    }
    let Some(adjusted) = adjusted.into_iter().collect::<Option<Vec<f64>>>() else {
        return Err(SirError::Serde(ErrorInfo::new(
            "csv-time-adj",
            "time_adj column is only partially filled",
        )));
    };
    let offset = series.first().map(|row| row.time).unwrap_or(0.0) - adjusted[0];
    Ok(LoadedSeries::Aligned(AlignedOutputSeries::from_parts(
        series, offset, adjusted,
    )))
}

/// Reads a series CSV file.
pub fn load_series_csv(path: &Path) -> Result<LoadedSeries, SirError> {
    let file = File::open(path).map_err(|err| {
        SirError::Serde(
            ErrorInfo::new("csv-open", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    read_series_csv(file).map_err(|err| with_path(err, path))
}

/// Serializes `value` as pretty JSON with a trailing newline.
pub fn to_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, SirError> {
    let mut bytes = serde_json::to_vec_pretty(value)
        .map_err(|err| SirError::Serde(ErrorInfo::new("json-serialize", err.to_string())))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Writes `value` as pretty JSON to `path`.
pub fn save_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), SirError> {
    let bytes = to_json_bytes(value)?;
    fs::write(path, bytes).map_err(|err| {
        SirError::Serde(
            ErrorInfo::new("json-write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

fn snapshot_fields(row: &CompartmentSnapshot) -> [String; 4] {
    [
        row.time.to_string(),
        row.susceptible.to_string(),
        row.infected.to_string(),
        row.recovered.to_string(),
    ]
}

fn create(path: &Path) -> Result<File, SirError> {
    File::create(path).map_err(|err| {
        SirError::Serde(
            ErrorInfo::new("csv-create", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

fn csv_error(err: csv::Error) -> SirError {
    SirError::Serde(ErrorInfo::new("csv-write", err.to_string()))
}

fn with_path(err: SirError, path: &Path) -> SirError {
    match err {
        SirError::Serde(info) => {
            SirError::Serde(info.with_context("path", path.display().to_string()))
        }
        other => other,
    }
}
