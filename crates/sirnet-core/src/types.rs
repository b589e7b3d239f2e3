use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SirError};

/// Compartment occupied by a node during an SIR run.
///
/// The ordering of the variants is the only legal direction of travel: a node
/// moves from `Susceptible` to `Infected` to `Recovered` and never back.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Status {
    /// Never infected so far.
    #[default]
    Susceptible,
    /// Currently infectious.
    Infected,
    /// Removed from the epidemic for the rest of the run.
    Recovered,
}

impl Status {
    /// Returns whether moving from `self` to `next` is a legal single step.
    pub fn can_transition_to(self, next: Status) -> bool {
        matches!(
            (self, next),
            (Status::Susceptible, Status::Infected) | (Status::Infected, Status::Recovered)
        )
    }

    /// Single-letter code used in compact traces.
    pub fn as_code(&self) -> &'static str {
        match self {
            Status::Susceptible => "S",
            Status::Infected => "I",
            Status::Recovered => "R",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Susceptible => "Susceptible",
            Status::Infected => "Infected",
            Status::Recovered => "Recovered",
        };
        f.write_str(label)
    }
}

impl FromStr for Status {
    type Err = SirError;

    /// Accepts full compartment names or their single-letter codes, ignoring case.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "s" | "susceptible" => Ok(Status::Susceptible),
            "i" | "infected" => Ok(Status::Infected),
            "r" | "recovered" => Ok(Status::Recovered),
            _ => Err(SirError::InvalidConfiguration(
                ErrorInfo::new("unknown-compartment", "unrecognised compartment name")
                    .with_context("value", value)
                    .with_hint("expected Susceptible, Infected or Recovered"),
            )),
        }
    }
}
