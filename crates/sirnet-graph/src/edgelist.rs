use std::fs;
use std::path::Path;

use sirnet_core::errors::{ErrorInfo, SirError};
use tracing::{debug, warn};

use crate::network::ContactNetwork;

/// Parses a whitespace separated edge list.
///
/// Each non-empty line holds either a single label (an isolated node) or two
/// labels joined by an edge; further columns such as weights are ignored.
/// Text after `#` is a comment. Duplicate edges are collapsed and self-loops
/// are skipped, both with a warning.
pub fn parse_edge_list(text: &str) -> Result<ContactNetwork, SirError> {
    let mut network = ContactNetwork::new();
    let mut duplicates = 0usize;
    for (line_no, raw) in text.lines().enumerate() {
        let line = match raw.split_once('#') {
            Some((content, _)) => content,
            None => raw,
        };
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };
        let Some(second) = tokens.next() else {
            network.add_node(first);
            continue;
        };
        if first == second {
            warn!(line = line_no + 1, node = first, "skipping self-loop");
            network.add_node(first);
            continue;
        }
        let added = network
            .add_labeled_edge(first, second)
            .map_err(|err| with_line(err, line_no + 1))?;
        if !added {
            duplicates += 1;
        }
    }
    if duplicates > 0 {
        warn!(duplicates, "collapsed duplicate edges");
    }
    debug!(
        nodes = network.labels().count(),
        edges = network.edge_count(),
        "parsed edge list"
    );
    Ok(network)
}

/// Reads and parses an edge list file.
pub fn read_edge_list(path: &Path) -> Result<ContactNetwork, SirError> {
    let text = fs::read_to_string(path).map_err(|err| {
        SirError::Serde(
            ErrorInfo::new("read-edge-list", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    parse_edge_list(&text).map_err(|err| match err {
        SirError::Graph(info) => {
            SirError::Graph(info.with_context("path", path.display().to_string()))
        }
        other => other,
    })
}

fn with_line(err: SirError, line: usize) -> SirError {
    match err {
        SirError::Graph(info) => SirError::Graph(info.with_context("line", line.to_string())),
        other => other,
    }
}
