//! Graph validation.

use crate::error::{Result, SigflowError};

use super::SignalFlowGraph;

/// Validate a graph for Mason analysis.
///
/// Checks:
/// - At least two nodes exist
/// - Input and output nodes resolve to nodes of the graph
pub fn validate_graph(graph: &SignalFlowGraph) -> Result<()> {
    if graph.node_count() < 2 {
        return Err(SigflowError::GraphTooSmall {
            nodes: graph.node_count(),
        });
    }

    for id in [graph.input_node(), graph.output_node()].into_iter().flatten() {
        if !graph.contains_node(id) {
            return Err(SigflowError::NodeNotFound {
                node: id.to_string(),
            });
        }
    }

    Ok(())
}
