//! Core types for graph representation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gain::Gain;

/// A unique identifier for a node in the graph.
///
/// Ids are assigned once and never change. Loop signatures are built from
/// the decimal form of these ids.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a branch in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchId(pub usize);

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}", self.0)
    }
}

/// A graph node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Stable identifier
    pub id: NodeId,
    /// Display name (not required to be unique)
    pub name: String,
}

/// A directed, gain-labelled branch between two nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub id: BranchId,
    /// Source node
    pub from: NodeId,
    /// Destination node
    pub to: NodeId,
    /// Branch gain
    pub gain: Gain,
}

impl Branch {
    /// Check if this branch starts and ends on the same node.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}
