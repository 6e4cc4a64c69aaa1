//! Loop enumeration, canonicalization and merging.
//!
//! Every node is used as a starting point for a depth-first cycle search, so
//! the same geometric cycle is discovered once per member node. Raw loops are
//! collapsed on `(node signature, normalized gain)` and the survivors are
//! then grouped by normalized gain into [`MergedLoop`]s.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::gain::Gain;
use crate::graph::{NodeId, SignalFlowGraph};

/// A single discovered cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLoop {
    /// Node sequence, closed (`last == first`)
    pub nodes: Vec<NodeId>,
    /// Loop gain, simplified for display
    pub gain: Gain,
    /// Rotation- and direction-invariant node signature
    pub signature: String,
    /// Order-independent gain key
    pub normalized_gain: String,
}

/// All stored loops sharing one normalized gain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedLoop {
    /// Representative node sequence (first member)
    pub nodes: Vec<NodeId>,
    /// Representative gain
    pub gain: Gain,
    /// Node sequences of every member loop
    pub all_paths: Vec<Vec<NodeId>>,
    #[serde(skip)]
    pub normalized_gain: String,
    #[serde(skip)]
    pub signature: String,
}

impl MergedLoop {
    /// Union of the nodes of all member loops.
    pub fn node_set(&self) -> HashSet<NodeId> {
        self.all_paths.iter().flatten().copied().collect()
    }
}

/// Canonical signature of a cycle.
///
/// A duplicated closing node is dropped and the cycle is rotated to start at
/// its smallest id. The same is done for the reversed cycle, and the
/// lexicographically smaller of the two comma-joined strings is returned.
pub fn loop_signature(nodes: &[NodeId]) -> String {
    let open = match nodes {
        [first, .., last] if first == last => &nodes[..nodes.len() - 1],
        _ => nodes,
    };

    let forward = join(&rotate_to_min(open.to_vec()));
    let backward = join(&rotate_to_min(open.iter().rev().copied().collect()));
    forward.min(backward)
}

fn rotate_to_min(mut nodes: Vec<NodeId>) -> Vec<NodeId> {
    let min_index = nodes
        .iter()
        .enumerate()
        .min_by_key(|(_, id)| **id)
        .map(|(i, _)| i)
        .unwrap_or(0);
    nodes.rotate_left(min_index);
    nodes
}

fn join(nodes: &[NodeId]) -> String {
    nodes
        .iter()
        .map(NodeId::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

struct LoopSearch<'g> {
    graph: &'g SignalFlowGraph,
    start: NodeId,
    include_self_loops: bool,
    on_stack: HashSet<NodeId>,
    path: Vec<NodeId>,
    seen: HashSet<(String, String)>,
    found: Vec<RawLoop>,
}

impl LoopSearch<'_> {
    fn visit(&mut self, current: NodeId, gain: Gain) {
        self.on_stack.insert(current);
        self.path.push(current);

        let graph = self.graph;
        for branch in graph.outgoing(current) {
            let closes =
                branch.to == self.start && (!branch.is_self_loop() || self.include_self_loops);
            if closes {
                self.record(gain.multiply(&branch.gain));
            } else if !self.on_stack.contains(&branch.to) {
                self.visit(branch.to, gain.multiply(&branch.gain));
            }
        }

        self.path.pop();
        self.on_stack.remove(&current);
    }

    fn record(&mut self, gain: Gain) {
        let mut nodes = self.path.clone();
        nodes.push(self.start);

        let signature = loop_signature(&nodes);
        let normalized_gain = gain.normalized();
        if self.seen.insert((signature.clone(), normalized_gain.clone())) {
            self.found.push(RawLoop {
                nodes,
                gain: gain.simplified(),
                signature,
                normalized_gain,
            });
        }
    }
}

/// Find every distinct cycle of the graph.
///
/// Starting nodes are taken in creation order. A branch straight back to the
/// starting node only closes a loop once the path has left that node, unless
/// `include_self_loops` is set.
pub fn find_raw_loops(graph: &SignalFlowGraph, include_self_loops: bool) -> Vec<RawLoop> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for node in graph.nodes() {
        let mut search = LoopSearch {
            graph,
            start: node.id,
            include_self_loops,
            on_stack: HashSet::new(),
            path: Vec::new(),
            seen,
            found,
        };
        search.visit(node.id, Gain::one());
        seen = search.seen;
        found = search.found;
    }

    found
}

/// Group raw loops by normalized gain, keeping first-seen order.
pub fn merge_loops(raw: Vec<RawLoop>) -> Vec<MergedLoop> {
    let mut merged: Vec<MergedLoop> = Vec::new();
    let mut by_gain: HashMap<String, usize> = HashMap::new();

    for lp in raw {
        match by_gain.get(&lp.normalized_gain) {
            Some(&idx) => merged[idx].all_paths.push(lp.nodes),
            None => {
                by_gain.insert(lp.normalized_gain.clone(), merged.len());
                merged.push(MergedLoop {
                    all_paths: vec![lp.nodes.clone()],
                    nodes: lp.nodes,
                    gain: lp.gain,
                    normalized_gain: lp.normalized_gain,
                    signature: lp.signature,
                });
            }
        }
    }

    merged
}

/// Enumerate, deduplicate and merge all loops of the graph.
pub fn find_all_loops(graph: &SignalFlowGraph, include_self_loops: bool) -> Vec<MergedLoop> {
    let raw = find_raw_loops(graph, include_self_loops);
    let raw_count = raw.len();
    let merged = merge_loops(raw);
    tracing::debug!(raw = raw_count, merged = merged.len(), "loops enumerated");
    merged
}
