use serde::{Deserialize, Serialize};
use sirnet_core::errors::{ErrorInfo, SirError};
use sirnet_core::{ContactGraph, NodeId, Sampler, Status};
use tracing::{debug, trace};

use crate::config::EpidemicConfig;
use crate::event::{Event, EventKind};
use crate::queue::EventQueue;
use crate::series::{CompartmentSnapshot, OutputSeries};

/// Result of processing a single queued event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// The event matched its precondition and changed the node's status.
    Honored(Event),
    /// The node had already moved on; the event was dropped.
    Discarded(Event),
    /// The queue is empty or the next event lies at or beyond the horizon.
    Finished,
}

/// Event accounting for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Events that changed a node's status.
    pub honored: u64,
    /// Stale events dropped because the node had already moved on.
    pub discarded: u64,
    /// Events ever placed on the queue, seeds included.
    pub scheduled: u64,
    /// Events still queued when the run stopped at the horizon.
    pub pending_at_stop: u64,
}

#[derive(Debug, Clone, Copy)]
struct Counts {
    susceptible: usize,
    infected: usize,
    recovered: usize,
}

/// One SIR run over a contact network, advanced event by event.
///
/// The simulation exclusively owns the event queue and the per-node status
/// table; the network is only read.
pub struct Simulation<'a, G: ContactGraph + ?Sized, S: Sampler + ?Sized> {
    graph: &'a G,
    sampler: &'a mut S,
    config: EpidemicConfig,
    queue: EventQueue,
    statuses: Vec<Status>,
    counts: Counts,
    snapshots: Vec<CompartmentSnapshot>,
    stats: RunStats,
    now: f64,
    finished: bool,
}

impl<'a, G: ContactGraph + ?Sized, S: Sampler + ?Sized> Simulation<'a, G, S> {
    /// Validates the configuration, seeds the initial infections and records
    /// the snapshot at time zero.
    pub fn new(
        graph: &'a G,
        config: &EpidemicConfig,
        sampler: &'a mut S,
    ) -> Result<Self, SirError> {
        let node_count = graph.node_count();
        config.validate(node_count)?;
        let nodes = dense_nodes(graph)?;

        let mut simulation = Self {
            graph,
            sampler,
            config: config.clone(),
            queue: EventQueue::with_capacity(node_count),
            statuses: vec![Status::Susceptible; node_count],
            counts: Counts {
                susceptible: node_count,
                infected: 0,
                recovered: 0,
            },
            snapshots: Vec::new(),
            stats: RunStats::default(),
            now: 0.0,
            finished: false,
        };

        let seeds = simulation
            .sampler
            .sample_without_replacement(node_count, config.initial_infected);
        check_seeds(&seeds, node_count, config.initial_infected)?;
        debug!(
            nodes = node_count,
            seeds = seeds.len(),
            infection_rate = config.infection_rate,
            recovery_rate = config.recovery_rate,
            horizon = config.horizon,
            "seeding run"
        );
        for index in seeds {
            simulation.infect_and_spread(nodes[index], 0.0);
        }
        simulation.record(0.0);
        Ok(simulation)
    }

    /// Processes the earliest pending event.
    pub fn step(&mut self) -> StepOutcome {
        if self.finished {
            return StepOutcome::Finished;
        }
        let due = match self.queue.peek_earliest() {
            Some(event) => event.time() < self.config.horizon,
            None => false,
        };
        if !due {
            self.stop();
            return StepOutcome::Finished;
        }
        let Some(event) = self.queue.pop_earliest() else {
            self.stop();
            return StepOutcome::Finished;
        };

        let node = event.node();
        if !event.applies_to(self.statuses[node.index()]) {
            self.stats.discarded += 1;
            trace!(
                time = event.time(),
                node = node.as_raw(),
                kind = ?event.kind(),
                status = self.statuses[node.index()].as_code(),
                "discarded stale event"
            );
            return StepOutcome::Discarded(event);
        }

        self.now = event.time();
        match event.kind() {
            EventKind::Recover => {
                self.transition(node, Status::Recovered);
            }
            EventKind::Infect => {
                self.infect_and_spread(node, event.time());
            }
        }
        self.stats.honored += 1;
        self.record(event.time());
        trace!(
            time = event.time(),
            node = node.as_raw(),
            kind = ?event.kind(),
            susceptible = self.counts.susceptible,
            infected = self.counts.infected,
            recovered = self.counts.recovered,
            "honored event"
        );
        StepOutcome::Honored(event)
    }

    /// Processes events until the queue drains or the horizon is reached.
    pub fn run_to_end(&mut self) {
        while !matches!(self.step(), StepOutcome::Finished) {}
    }

    /// Current status of `node`.
    pub fn status(&self, node: NodeId) -> Option<Status> {
        self.statuses.get(node.index()).copied()
    }

    /// Time of the most recently honored event.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Whether the run has stopped.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of events still queued.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Event accounting so far.
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Snapshots recorded so far.
    pub fn snapshots(&self) -> &[CompartmentSnapshot] {
        &self.snapshots
    }

    /// Hands the recorded series to the caller.
    pub fn finish(self) -> OutputSeries {
        OutputSeries::from_engine(self.statuses.len(), self.snapshots)
    }

    /// Marks `node` infected at `time`, schedules its recovery and the
    /// infection attempts on its neighbours that beat that recovery.
    fn infect_and_spread(&mut self, node: NodeId, time: f64) {
        self.transition(node, Status::Infected);
        let infectious_for = self.sampler.sample_exponential(self.config.recovery_rate);
        debug_assert!(infectious_for >= 0.0, "negative waiting time {infectious_for}");
        self.schedule(Event::recover(time + infectious_for, node));

        let graph = self.graph;
        for neighbor in graph.neighbors(node) {
            let delay = self.sampler.sample_exponential(self.config.infection_rate);
            debug_assert!(delay >= 0.0, "negative waiting time {delay}");
            if delay < infectious_for {
                self.schedule(Event::infect(time + delay, neighbor));
            }
        }
    }

    fn transition(&mut self, node: NodeId, next: Status) {
        let current = &mut self.statuses[node.index()];
        debug_assert!(current.can_transition_to(next));
        match next {
            Status::Infected => {
                self.counts.susceptible -= 1;
                self.counts.infected += 1;
            }
            Status::Recovered => {
                self.counts.infected -= 1;
                self.counts.recovered += 1;
            }
            Status::Susceptible => {}
        }
        *current = next;
    }

    fn schedule(&mut self, event: Event) {
        self.queue.schedule(event);
        self.stats.scheduled += 1;
    }

    fn record(&mut self, time: f64) {
        self.snapshots.push(CompartmentSnapshot::new(
            time,
            self.counts.susceptible,
            self.counts.infected,
            self.counts.recovered,
        ));
    }

    fn stop(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.stats.pending_at_stop = self.queue.len() as u64;
        debug!(
            honored = self.stats.honored,
            discarded = self.stats.discarded,
            scheduled = self.stats.scheduled,
            pending = self.stats.pending_at_stop,
            end_time = self.now,
            susceptible = self.counts.susceptible,
            infected = self.counts.infected,
            recovered = self.counts.recovered,
            "run finished"
        );
    }
}

/// Runs a full simulation and returns its output series.
///
/// The result is fully determined by the sequence of draws `sampler` produces.
pub fn run<G, S>(
    graph: &G,
    config: &EpidemicConfig,
    sampler: &mut S,
) -> Result<OutputSeries, SirError>
where
    G: ContactGraph + ?Sized,
    S: Sampler + ?Sized,
{
    let mut simulation = Simulation::new(graph, config, sampler)?;
    simulation.run_to_end();
    Ok(simulation.finish())
}

/// Collects the node list and checks that identifiers are dense, unique and
/// that every neighbour refers to a known node.
fn dense_nodes<G: ContactGraph + ?Sized>(graph: &G) -> Result<Vec<NodeId>, SirError> {
    let node_count = graph.node_count();
    let nodes: Vec<NodeId> = graph.nodes().collect();
    if nodes.len() != node_count {
        return Err(SirError::Graph(
            ErrorInfo::new("node-count", "node iterator disagrees with node count")
                .with_context("nodes", nodes.len().to_string())
                .with_context("node_count", node_count.to_string()),
        ));
    }
    let mut seen = vec![false; node_count];
    for &node in &nodes {
        if node.index() >= node_count {
            return Err(SirError::Graph(
                ErrorInfo::new("sparse-node-id", "node identifiers must be dense")
                    .with_context("node", node.as_raw().to_string())
                    .with_context("node_count", node_count.to_string()),
            ));
        }
        if std::mem::replace(&mut seen[node.index()], true) {
            return Err(SirError::Graph(
                ErrorInfo::new("duplicate-node-id", "node identifiers must be unique")
                    .with_context("node", node.as_raw().to_string()),
            ));
        }
        if let Some(neighbor) = graph.neighbors(node).find(|n| n.index() >= node_count) {
            return Err(SirError::Graph(
                ErrorInfo::new("unknown-neighbor", "neighbour refers to a missing node")
                    .with_context("node", node.as_raw().to_string())
                    .with_context("neighbor", neighbor.as_raw().to_string()),
            ));
        }
    }
    Ok(nodes)
}

fn check_seeds(seeds: &[usize], node_count: usize, expected: usize) -> Result<(), SirError> {
    let mut taken = vec![false; node_count];
    for &index in seeds {
        if index >= node_count || std::mem::replace(&mut taken[index], true) {
            return Err(SirError::InvalidConfiguration(
                ErrorInfo::new("seed-sample", "sampler returned an invalid seed set")
                    .with_context("index", index.to_string())
                    .with_context("nodes", node_count.to_string()),
            ));
        }
    }
    if seeds.len() != expected {
        return Err(SirError::InvalidConfiguration(
            ErrorInfo::new("seed-sample", "sampler returned the wrong number of seeds")
                .with_context("expected", expected.to_string())
                .with_context("found", seeds.len().to_string()),
        ));
    }
    Ok(())
}
