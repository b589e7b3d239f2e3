#![deny(missing_docs)]

//! Event-driven stochastic SIR simulation on contact networks.
//!
//! A run seeds a handful of infections, then repeatedly pops the earliest
//! pending event from a min-heap. Infection and recovery events are proposals:
//! they only take effect when the target node is still in the compartment the
//! event expects, so racing infection attempts from several neighbours resolve
//! to whichever is dequeued first and the rest are discarded.

/// Time alignment of output series on an epidemic-size threshold.
pub mod align;
/// YAML configuration schema and defaults.
pub mod config;
/// Deterministic seed derivation helpers.
pub mod determinism;
/// The simulation engine and its `run` entry point.
pub mod engine;
/// Scheduled infection and recovery proposals.
pub mod event;
/// CSV and JSON export of output series.
pub mod export;
/// Run manifest serialization helpers.
pub mod manifest;
/// Binary-heap event queue.
pub mod queue;
/// Compartment snapshots and the output series.
pub mod series;
/// Summary statistics over an output series.
pub mod summary;

pub use align::{align, AlignedOutputSeries, TimeColumn, TimeTable};
pub use config::{AlignmentConfig, EpidemicConfig, OutputConfig, RunPlan};
pub use engine::{run, RunStats, Simulation, StepOutcome};
pub use event::{Event, EventKind};
pub use queue::EventQueue;
pub use series::{CompartmentSnapshot, OutputSeries};
pub use summary::SeriesSummary;
