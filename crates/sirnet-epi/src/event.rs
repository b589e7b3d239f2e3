use serde::{Deserialize, Serialize};
use sirnet_core::{NodeId, Status};

/// What a scheduled event proposes to do to its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Move a susceptible node to infected.
    Infect,
    /// Move an infected node to recovered.
    Recover,
}

impl EventKind {
    /// Status the node must hold for the event to be honored.
    pub fn precondition(&self) -> Status {
        match self {
            EventKind::Infect => Status::Susceptible,
            EventKind::Recover => Status::Infected,
        }
    }

    /// Status the node holds after the event is honored.
    pub fn outcome(&self) -> Status {
        match self {
            EventKind::Infect => Status::Infected,
            EventKind::Recover => Status::Recovered,
        }
    }
}

/// Immutable proposal to change a node's status at a given time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    time: f64,
    node: NodeId,
    kind: EventKind,
}

impl Event {
    /// Creates a new event.
    pub fn new(time: f64, node: NodeId, kind: EventKind) -> Self {
        Self { time, node, kind }
    }

    /// Proposes infecting `node` at `time`.
    pub fn infect(time: f64, node: NodeId) -> Self {
        Self::new(time, node, EventKind::Infect)
    }

    /// Proposes recovering `node` at `time`.
    pub fn recover(time: f64, node: NodeId) -> Self {
        Self::new(time, node, EventKind::Recover)
    }

    /// Simulation time at which the event fires.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Target node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Kind of transition proposed.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Whether the event applies to a node currently in `status`.
    pub fn applies_to(&self, status: Status) -> bool {
        status == self.kind.precondition()
    }
}
