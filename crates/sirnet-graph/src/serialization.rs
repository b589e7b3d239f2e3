use sirnet_core::errors::{ErrorInfo, SirError};
use sirnet_core::provenance::SchemaVersion;
use sirnet_core::NodeId;
use serde::{Deserialize, Serialize};

use crate::network::ContactNetwork;

const NETWORK_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Serializes the network to a compact binary representation using `bincode`.
pub fn network_to_bytes(network: &ContactNetwork) -> Result<Vec<u8>, SirError> {
    let serializable = SerializableNetwork::from_network(network);
    bincode::serialize(&serializable)
        .map_err(|err| SirError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a network from its binary representation.
pub fn network_from_bytes(bytes: &[u8]) -> Result<ContactNetwork, SirError> {
    let serializable: SerializableNetwork = bincode::deserialize(bytes)
        .map_err(|err| SirError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_network()
}

/// Serializes the network to a JSON string.
pub fn network_to_json(network: &ContactNetwork) -> Result<String, SirError> {
    let serializable = SerializableNetwork::from_network(network);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| SirError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a network from a JSON string.
pub fn network_from_json(json: &str) -> Result<ContactNetwork, SirError> {
    let serializable: SerializableNetwork = serde_json::from_str(json)
        .map_err(|err| SirError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_network()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableNetwork {
    schema_version: SchemaVersion,
    labels: Vec<String>,
    edges: Vec<(u64, u64)>,
}

impl SerializableNetwork {
    fn from_network(network: &ContactNetwork) -> Self {
        Self {
            schema_version: NETWORK_SCHEMA,
            labels: network.labels().map(str::to_owned).collect(),
            edges: network
                .edges()
                .iter()
                .map(|(a, b)| (a.as_raw(), b.as_raw()))
                .collect(),
        }
    }

    fn into_network(self) -> Result<ContactNetwork, SirError> {
        if self.schema_version.major != NETWORK_SCHEMA.major {
            return Err(SirError::Serde(
                ErrorInfo::new("schema-version", "unsupported network schema")
                    .with_context("found", self.schema_version.major.to_string())
                    .with_context("expected", NETWORK_SCHEMA.major.to_string()),
            ));
        }
        let mut network = ContactNetwork::new();
        for label in self.labels {
            network.add_node(label);
        }
        for (a, b) in self.edges {
            network.add_edge(NodeId::from_raw(a), NodeId::from_raw(b))?;
        }
        Ok(network)
    }
}
