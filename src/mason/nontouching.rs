//! Search for groups of mutually non-touching loops.

use std::collections::HashSet;

use serde::Serialize;

use super::loops::MergedLoop;
use super::CombinationOrder;
use crate::gain::{self, Gain};
use crate::graph::NodeId;

/// A group of two or more loops that share no node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NonTouchingSet {
    /// Member loops, in loop order
    pub loops: Vec<MergedLoop>,
    /// Product of the member gains
    pub gain: Gain,
}

impl NonTouchingSet {
    /// Number of loops in the group.
    pub fn order(&self) -> usize {
        self.loops.len()
    }
}

/// Find groups of mutually disjoint loops.
///
/// Two loops touch when any member path of one shares a node with any member
/// path of the other. Groups are reported by increasing size, and within one
/// size by ascending loop index, so `(A, B)` appears but never `(B, A)`.
/// [`CombinationOrder::Pairs`] stops after pairs.
pub fn find_non_touching(loops: &[MergedLoop], order: CombinationOrder) -> Vec<NonTouchingSet> {
    let node_sets: Vec<HashSet<NodeId>> = loops.iter().map(MergedLoop::node_set).collect();

    let mut level: Vec<(Vec<usize>, HashSet<NodeId>)> = Vec::new();
    for i in 0..loops.len() {
        for j in (i + 1)..loops.len() {
            if node_sets[i].is_disjoint(&node_sets[j]) {
                let union = node_sets[i].union(&node_sets[j]).copied().collect();
                level.push((vec![i, j], union));
            }
        }
    }

    let mut groups: Vec<Vec<usize>> = level.iter().map(|(g, _)| g.clone()).collect();

    if order == CombinationOrder::All {
        while !level.is_empty() {
            let mut next = Vec::new();
            for (members, used) in &level {
                let last = members[members.len() - 1];
                for k in (last + 1)..loops.len() {
                    if used.is_disjoint(&node_sets[k]) {
                        let mut grown = members.clone();
                        grown.push(k);
                        let mut union = used.clone();
                        union.extend(node_sets[k].iter().copied());
                        next.push((grown, union));
                    }
                }
            }
            groups.extend(next.iter().map(|(g, _)| g.clone()));
            level = next;
        }
    }

    let sets: Vec<NonTouchingSet> = groups
        .into_iter()
        .map(|members| {
            let product = members
                .iter()
                .fold(gain::UNITY.to_string(), |acc, &i| {
                    gain::multiply(&acc, &loops[i].gain.to_string())
                });
            NonTouchingSet {
                loops: members.iter().map(|&i| loops[i].clone()).collect(),
                gain: Gain::parse(&gain::simplify(&product)),
            }
        })
        .collect();

    tracing::debug!(loops = loops.len(), groups = sets.len(), ?order, "non-touching groups found");
    sets
}
