//! Forward path enumeration.

use std::collections::HashSet;

use serde::Serialize;

use crate::gain::Gain;
use crate::graph::{NodeId, SignalFlowGraph};

/// A simple directed path between the input and output nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForwardPath {
    /// Node sequence, input first
    pub nodes: Vec<NodeId>,
    /// Product of the branch gains along the path
    pub gain: Gain,
}

impl ForwardPath {
    /// Check if the path passes through a node.
    pub fn touches(&self, nodes: &HashSet<NodeId>) -> bool {
        self.nodes.iter().any(|n| nodes.contains(n))
    }
}

struct PathSearch<'g> {
    graph: &'g SignalFlowGraph,
    end: NodeId,
    on_stack: HashSet<NodeId>,
    path: Vec<NodeId>,
    found: Vec<ForwardPath>,
}

impl PathSearch<'_> {
    fn visit(&mut self, current: NodeId, gain: Gain) {
        self.on_stack.insert(current);
        self.path.push(current);

        if current == self.end {
            self.found.push(ForwardPath {
                nodes: self.path.clone(),
                gain: gain.simplified(),
            });
        } else {
            let graph = self.graph;
            for branch in graph.outgoing(current) {
                if !self.on_stack.contains(&branch.to) {
                    self.visit(branch.to, gain.multiply(&branch.gain));
                }
            }
        }

        self.path.pop();
        self.on_stack.remove(&current);
    }
}

/// Find every simple path from `start` to `end`.
///
/// Branches are tried in insertion order, so results come back in discovery
/// order. When `start == end` the single one-node path with gain `1` is
/// returned.
pub fn find_all_paths(graph: &SignalFlowGraph, start: NodeId, end: NodeId) -> Vec<ForwardPath> {
    let mut search = PathSearch {
        graph,
        end,
        on_stack: HashSet::new(),
        path: Vec::new(),
        found: Vec::new(),
    };
    search.visit(start, Gain::one());
    tracing::debug!(start = %start, end = %end, paths = search.found.len(), "forward paths enumerated");
    search.found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> (SignalFlowGraph, Vec<NodeId>) {
        let mut g = SignalFlowGraph::new();
        let ids: Vec<NodeId> = (1..=4).map(|i| g.add_node(format!("N{}", i))).collect();
        g.add_branch(ids[0], ids[1], "g1").unwrap();
        g.add_branch(ids[1], ids[2], "g2").unwrap();
        g.add_branch(ids[2], ids[3], "g3").unwrap();
        g.add_branch(ids[1], ids[3], "g4").unwrap();
        g.add_branch(ids[2], ids[1], "h1").unwrap();
        (g, ids)
    }

    #[test]
    fn test_paths_in_discovery_order() {
        let (g, ids) = chain();
        let paths = find_all_paths(&g, ids[0], ids[3]);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].nodes, vec![ids[0], ids[1], ids[2], ids[3]]);
        assert_eq!(paths[0].gain.to_string(), "g1*g2*g3");
        assert_eq!(paths[1].nodes, vec![ids[0], ids[1], ids[3]]);
        assert_eq!(paths[1].gain.to_string(), "g1*g4");
    }

    #[test]
    fn test_paths_are_simple() {
        let (g, ids) = chain();
        for path in find_all_paths(&g, ids[0], ids[3]) {
            let unique: HashSet<_> = path.nodes.iter().collect();
            assert_eq!(unique.len(), path.nodes.len());
        }
    }

    #[test]
    fn test_disconnected_has_no_paths() {
        let mut g = SignalFlowGraph::new();
        let a = g.add_node("a");
        let b = g.add_node("b");
        g.add_branch(b, a, "g").unwrap();
        assert!(find_all_paths(&g, a, b).is_empty());
    }

    #[test]
    fn test_start_equals_end() {
        let mut g = SignalFlowGraph::new();
        let a = g.add_node("a");
        g.add_branch(a, a, "g").unwrap();
        let paths = find_all_paths(&g, a, a);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].nodes, vec![a]);
        assert!(paths[0].gain.is_one());
    }

    #[test]
    fn test_touches() {
        let (g, ids) = chain();
        let path = &find_all_paths(&g, ids[0], ids[3])[1];
        assert!(path.touches(&HashSet::from([ids[1]])));
        assert!(!path.touches(&HashSet::from([ids[2]])));
    }

    #[test]
    fn test_unit_branches_elided() {
        let mut g = SignalFlowGraph::new();
        let a = g.add_node("a");
        let b = g.add_node("b");
        let c = g.add_node("c");
        g.add_branch(a, b, "1").unwrap();
        g.add_branch(b, c, "g").unwrap();
        let paths = find_all_paths(&g, a, c);
        assert_eq!(paths[0].gain.to_string(), "g");
    }
}
