use serde::{Deserialize, Serialize};
use sirnet_core::errors::{ErrorInfo, SirError};
use sirnet_core::Status;

/// Compartment counts recorded at one simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompartmentSnapshot {
    /// Simulation time of the honored event (zero for the initial row).
    pub time: f64,
    /// Number of susceptible nodes.
    #[serde(rename = "Susceptible")]
    pub susceptible: usize,
    /// Number of infected nodes.
    #[serde(rename = "Infected")]
    pub infected: usize,
    /// Number of recovered nodes.
    #[serde(rename = "Recovered")]
    pub recovered: usize,
}

impl CompartmentSnapshot {
    /// Creates a snapshot.
    pub fn new(time: f64, susceptible: usize, infected: usize, recovered: usize) -> Self {
        Self {
            time,
            susceptible,
            infected,
            recovered,
        }
    }

    /// Count for the given compartment.
    pub fn count(&self, compartment: Status) -> usize {
        match compartment {
            Status::Susceptible => self.susceptible,
            Status::Infected => self.infected,
            Status::Recovered => self.recovered,
        }
    }

    /// Sum of all three compartments.
    pub fn total(&self) -> usize {
        self.susceptible + self.infected + self.recovered
    }
}

/// Ordered compartment snapshots produced by one run.
///
/// Every series starts at time zero, never goes back in time and conserves
/// the node count in every row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSeries {
    total_nodes: usize,
    snapshots: Vec<CompartmentSnapshot>,
}

impl OutputSeries {
    pub(crate) fn from_engine(total_nodes: usize, snapshots: Vec<CompartmentSnapshot>) -> Self {
        Self {
            total_nodes,
            snapshots,
        }
    }

    /// Builds a series from externally supplied rows, checking its invariants.
    ///
    /// The node count is taken from the first row.
    pub fn from_snapshots(snapshots: Vec<CompartmentSnapshot>) -> Result<Self, SirError> {
        let Some(first) = snapshots.first() else {
            return Err(SirError::Serde(ErrorInfo::new(
                "empty-series",
                "an output series needs at least the initial snapshot",
            )));
        };
        if first.time != 0.0 {
            return Err(SirError::Serde(
                ErrorInfo::new("series-start", "first snapshot must be at time zero")
                    .with_context("time", first.time.to_string()),
            ));
        }
        let total_nodes = first.total();
        let mut previous = first.time;
        for (row, snapshot) in snapshots.iter().enumerate() {
            if snapshot.total() != total_nodes {
                return Err(SirError::Serde(
                    ErrorInfo::new("series-conservation", "compartment counts do not add up")
                        .with_context("row", row.to_string())
                        .with_context("expected", total_nodes.to_string())
                        .with_context("found", snapshot.total().to_string()),
                ));
            }
            if snapshot.time.is_nan() || snapshot.time < previous {
                return Err(SirError::Serde(
                    ErrorInfo::new("series-order", "snapshot times must be non-decreasing")
                        .with_context("row", row.to_string())
                        .with_context("time", snapshot.time.to_string()),
                ));
            }
            previous = snapshot.time;
        }
        Ok(Self {
            total_nodes,
            snapshots,
        })
    }

    /// Number of nodes in the simulated network.
    pub fn total_nodes(&self) -> usize {
        self.total_nodes
    }

    /// All snapshots in time order.
    pub fn snapshots(&self) -> &[CompartmentSnapshot] {
        &self.snapshots
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false for series produced by the engine.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The initial snapshot.
    pub fn first(&self) -> Option<&CompartmentSnapshot> {
        self.snapshots.first()
    }

    /// The last recorded snapshot.
    pub fn last(&self) -> Option<&CompartmentSnapshot> {
        self.snapshots.last()
    }

    /// Iterates over the snapshots.
    pub fn iter(&self) -> std::slice::Iter<'_, CompartmentSnapshot> {
        self.snapshots.iter()
    }

    /// Snapshot times.
    pub fn times(&self) -> Vec<f64> {
        self.snapshots.iter().map(|row| row.time).collect()
    }

    /// Counts of one compartment across the series.
    pub fn column(&self, compartment: Status) -> Vec<usize> {
        self.snapshots
            .iter()
            .map(|row| row.count(compartment))
            .collect()
    }
}

impl<'a> IntoIterator for &'a OutputSeries {
    type Item = &'a CompartmentSnapshot;
    type IntoIter = std::slice::Iter<'a, CompartmentSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}
