use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sirnet_core::errors::{ErrorInfo, SirError};
use sirnet_core::Status;

/// Parameters of a single SIR run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpidemicConfig {
    /// Per-contact infection hazard. Zero disables transmission.
    #[serde(default = "default_infection_rate")]
    pub infection_rate: f64,
    /// Per-node recovery hazard.
    #[serde(default = "default_recovery_rate")]
    pub recovery_rate: f64,
    /// Number of nodes infected at time zero.
    #[serde(default = "default_initial_infected")]
    pub initial_infected: usize,
    /// Events at or beyond this time are never processed.
    #[serde(default = "default_horizon")]
    pub horizon: f64,
}

fn default_infection_rate() -> f64 {
    0.5
}

fn default_recovery_rate() -> f64 {
    1.0
}

fn default_initial_infected() -> usize {
    1
}

fn default_horizon() -> f64 {
    20.0
}

impl Default for EpidemicConfig {
    fn default() -> Self {
        Self {
            infection_rate: default_infection_rate(),
            recovery_rate: default_recovery_rate(),
            initial_infected: default_initial_infected(),
            horizon: default_horizon(),
        }
    }
}

impl EpidemicConfig {
    /// Checks the configuration against a network of `node_count` nodes.
    ///
    /// Values are never clamped; the first violated constraint is reported.
    pub fn validate(&self, node_count: usize) -> Result<(), SirError> {
        if node_count == 0 {
            return Err(SirError::InvalidConfiguration(
                ErrorInfo::new("empty-graph", "contact network has no nodes")
                    .with_hint("load a network with at least one node"),
            ));
        }
        if !self.infection_rate.is_finite() || self.infection_rate < 0.0 {
            return Err(SirError::InvalidConfiguration(
                ErrorInfo::new("infection-rate", "infection rate must be finite and non-negative")
                    .with_context("infection_rate", self.infection_rate.to_string()),
            ));
        }
        if !self.recovery_rate.is_finite() || self.recovery_rate <= 0.0 {
            return Err(SirError::InvalidConfiguration(
                ErrorInfo::new("recovery-rate", "recovery rate must be finite and positive")
                    .with_context("recovery_rate", self.recovery_rate.to_string()),
            ));
        }
        if self.initial_infected == 0 || self.initial_infected > node_count {
            return Err(SirError::InvalidConfiguration(
                ErrorInfo::new(
                    "initial-infected",
                    "initial infections must lie between 1 and the node count",
                )
                .with_context("initial_infected", self.initial_infected.to_string())
                .with_context("nodes", node_count.to_string()),
            ));
        }
        if self.horizon.is_nan() || self.horizon <= 0.0 {
            return Err(SirError::InvalidConfiguration(
                ErrorInfo::new("horizon", "horizon must be positive")
                    .with_context("horizon", self.horizon.to_string()),
            ));
        }
        Ok(())
    }

    /// SHA-256 over the canonical JSON encoding of the configuration.
    pub fn canonical_hash(&self) -> Result<String, SirError> {
        let bytes = serde_json::to_vec(self)
            .map_err(|err| SirError::Serde(ErrorInfo::new("config-hash", err.to_string())))?;
        Ok(format!("{:x}", Sha256::digest(&bytes)))
    }
}

/// Threshold alignment applied to every run of a plan.
///
/// Freshly simulated series only carry raw time, so the shifted column is
/// always `time`; realigning on `time_adj` is done on exported files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlignmentConfig {
    /// Count the criterion compartment must reach.
    pub threshold: usize,
    /// Compartment compared against the threshold.
    #[serde(default = "default_criterion")]
    pub criterion: Status,
}

fn default_criterion() -> Status {
    Status::Infected
}

/// Output file naming for a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File name prefix; run `k` writes `<prefix>-<k>.csv`.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Whether a JSON manifest is written next to every series.
    #[serde(default = "default_manifest")]
    pub manifest: bool,
}

fn default_prefix() -> String {
    "run".into()
}

fn default_manifest() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            manifest: default_manifest(),
        }
    }
}

/// YAML-configurable description of a batch of independent runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunPlan {
    /// Parameters shared by every run.
    #[serde(default)]
    pub epidemic: EpidemicConfig,
    /// Master seed; run `k` uses the substream seed derived from it.
    #[serde(default = "default_master_seed")]
    pub seed: u64,
    /// Number of sequential runs.
    #[serde(default = "default_runs")]
    pub runs: usize,
    /// Optional alignment applied to each run's series.
    #[serde(default)]
    pub alignment: Option<AlignmentConfig>,
    /// Output naming.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

fn default_runs() -> usize {
    1
}

impl Default for RunPlan {
    fn default() -> Self {
        Self {
            epidemic: EpidemicConfig::default(),
            seed: default_master_seed(),
            runs: default_runs(),
            alignment: None,
            output: OutputConfig::default(),
        }
    }
}

impl RunPlan {
    /// Parses a plan from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, SirError> {
        serde_yaml::from_str(text)
            .map_err(|err| SirError::Serde(ErrorInfo::new("plan-parse", err.to_string())))
    }

    /// Renders the plan as YAML.
    pub fn to_yaml(&self) -> Result<String, SirError> {
        serde_yaml::to_string(self)
            .map_err(|err| SirError::Serde(ErrorInfo::new("plan-serialize", err.to_string())))
    }
}
