use serde::{Deserialize, Serialize};

use crate::series::OutputSeries;

/// Headline numbers of an epidemic curve, used to compare runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    /// Number of nodes in the network.
    pub total_nodes: usize,
    /// Number of recorded snapshots.
    pub snapshots: usize,
    /// Largest simultaneous infected count.
    pub peak_infected: usize,
    /// Earliest time at which the peak was reached.
    pub peak_time: f64,
    /// Nodes ever infected by the end of the series.
    pub final_size: usize,
    /// Nodes still infected at the last snapshot.
    pub final_infected: usize,
    /// Time of the last snapshot.
    pub duration: f64,
}

impl SeriesSummary {
    /// Computes the summary for `series`.
    pub fn from_series(series: &OutputSeries) -> Self {
        let mut peak_infected = 0;
        let mut peak_time = 0.0;
        for row in series {
            if row.infected > peak_infected {
                peak_infected = row.infected;
                peak_time = row.time;
            }
        }
        let (final_size, final_infected, duration) = match series.last() {
            Some(last) => (
                series.total_nodes() - last.susceptible,
                last.infected,
                last.time,
            ),
            None => (0, 0, 0.0),
        };
        Self {
            total_nodes: series.total_nodes(),
            snapshots: series.len(),
            peak_infected,
            peak_time,
            final_size,
            final_infected,
            duration,
        }
    }

    /// Fraction of the network ever infected.
    pub fn attack_rate(&self) -> f64 {
        if self.total_nodes == 0 {
            0.0
        } else {
            self.final_size as f64 / self.total_nodes as f64
        }
    }
}
