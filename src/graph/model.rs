//! Signal-flow graph structure.

use std::collections::HashMap;

use super::types::{Branch, BranchId, Node, NodeId};
use crate::dsl::GraphAst;
use crate::error::{Result, SigflowError};
use crate::gain::Gain;

/// A directed multigraph of nodes and gain-labelled branches.
///
/// Outgoing branches are indexed per node in insertion order, which fixes the
/// order in which paths and loops are discovered.
#[derive(Debug, Clone, Default)]
pub struct SignalFlowGraph {
    /// Nodes in creation order
    nodes: Vec<Node>,
    /// Branches in insertion order
    branches: Vec<Branch>,
    /// Outgoing branch indices keyed by source node
    adjacency: HashMap<NodeId, Vec<BranchId>>,
    /// Explicit input node, if designated
    input: Option<NodeId>,
    /// Explicit output node, if designated
    output: Option<NodeId>,
    /// Next id handed out by [`SignalFlowGraph::add_node`]
    next_id: u64,
}

impl SignalFlowGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Build a graph from a parsed graph description.
    pub fn from_ast(ast: GraphAst) -> Result<Self> {
        let mut graph = Self::new();
        let mut ids: HashMap<String, NodeId> = HashMap::new();

        for decl in &ast.nodes {
            if ids.contains_key(&decl.name) {
                return Err(SigflowError::DuplicateNode {
                    name: decl.name.clone(),
                });
            }
            let label = decl.label.clone().unwrap_or_else(|| decl.name.clone());
            ids.insert(decl.name.clone(), graph.add_node(label));
        }

        let lookup = |name: &str| {
            ids.get(name).copied().ok_or_else(|| SigflowError::NodeNotFound {
                node: name.to_string(),
            })
        };

        for def in &ast.branches {
            graph.add_branch(lookup(&def.from)?, lookup(&def.to)?, &def.gain)?;
        }

        if let Some(name) = &ast.input_node {
            graph.set_input(lookup(name)?)?;
        }
        if let Some(name) = &ast.output_node {
            graph.set_output(lookup(name)?)?;
        }

        Ok(graph)
    }

    /// Add a node with the next free id.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(Node {
            id,
            name: name.into(),
        });
        id
    }

    /// Add a node with a caller-chosen id.
    ///
    /// Used when the graph is supplied by an editor that owns its own ids.
    pub fn add_node_with_id(&mut self, id: NodeId, name: impl Into<String>) -> Result<NodeId> {
        if self.contains_node(id) {
            return Err(SigflowError::DuplicateNode {
                name: id.to_string(),
            });
        }
        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.nodes.push(Node {
            id,
            name: name.into(),
        });
        Ok(id)
    }

    /// Change the display name of a node.
    pub fn rename_node(&mut self, id: NodeId, name: impl Into<String>) -> Result<()> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| SigflowError::NodeNotFound {
                node: id.to_string(),
            })?;
        node.name = name.into();
        Ok(())
    }

    /// Add a directed branch. Parallel branches are allowed.
    pub fn add_branch(&mut self, from: NodeId, to: NodeId, gain: &str) -> Result<BranchId> {
        self.require_node(from)?;
        self.require_node(to)?;
        if gain.trim().is_empty() {
            return Err(SigflowError::InvalidGain {
                message: format!("empty gain on branch {} -> {}", from, to),
            });
        }

        let id = BranchId(self.branches.len());
        self.branches.push(Branch {
            id,
            from,
            to,
            gain: Gain::parse(gain),
        });
        self.adjacency.entry(from).or_default().push(id);
        Ok(id)
    }

    /// Designate the input node.
    pub fn set_input(&mut self, id: NodeId) -> Result<()> {
        self.require_node(id)?;
        self.input = Some(id);
        Ok(())
    }

    /// Designate the output node.
    pub fn set_output(&mut self, id: NodeId) -> Result<()> {
        self.require_node(id)?;
        self.output = Some(id);
        Ok(())
    }

    /// Input node: the designated one, else the first-created node.
    pub fn input_node(&self) -> Option<NodeId> {
        self.input.or_else(|| self.nodes.first().map(|n| n.id))
    }

    /// Output node: the designated one, else the last-created node.
    pub fn output_node(&self) -> Option<NodeId> {
        self.output.or_else(|| self.nodes.last().map(|n| n.id))
    }

    /// Remove every node and branch.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All branches in insertion order.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Get the display name of a node.
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.nodes
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.name.as_str())
    }

    /// Outgoing branches of a node, in insertion order.
    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = &Branch> + '_ {
        self.adjacency
            .get(&id)
            .into_iter()
            .flatten()
            .map(move |b| &self.branches[b.0])
    }

    fn require_node(&self, id: NodeId) -> Result<()> {
        if self.contains_node(id) {
            Ok(())
        } else {
            Err(SigflowError::NodeNotFound {
                node: id.to_string(),
            })
        }
    }
}
