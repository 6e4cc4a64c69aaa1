//! Plain-data form of a graph as exchanged with an editor.

use serde::{Deserialize, Serialize};

use super::model::SignalFlowGraph;
use super::types::NodeId;
use crate::error::Result;

/// A node as supplied by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: u64,
    pub name: String,
}

/// A branch as supplied by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSnapshot {
    pub from: u64,
    pub to: u64,
    pub gain: String,
}

/// `{nodes: [{id, name}], branches: [{from, to, gain}]}`
///
/// Node order is creation order: the first node is the input and the last
/// node is the output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub nodes: Vec<NodeSnapshot>,
    #[serde(default)]
    pub branches: Vec<BranchSnapshot>,
}

impl GraphSnapshot {
    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a graph that keeps the editor's node ids.
    pub fn to_graph(&self) -> Result<SignalFlowGraph> {
        let mut graph = SignalFlowGraph::new();
        for node in &self.nodes {
            graph.add_node_with_id(NodeId(node.id), node.name.clone())?;
        }
        for branch in &self.branches {
            graph.add_branch(NodeId(branch.from), NodeId(branch.to), &branch.gain)?;
        }
        Ok(graph)
    }
}

impl From<&SignalFlowGraph> for GraphSnapshot {
    fn from(graph: &SignalFlowGraph) -> Self {
        Self {
            nodes: graph
                .nodes()
                .iter()
                .map(|n| NodeSnapshot {
                    id: n.id.0,
                    name: n.name.clone(),
                })
                .collect(),
            branches: graph
                .branches()
                .iter()
                .map(|b| BranchSnapshot {
                    from: b.from.0,
                    to: b.to.0,
                    gain: b.gain.to_string(),
                })
                .collect(),
        }
    }
}
