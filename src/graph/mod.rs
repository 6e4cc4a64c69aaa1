//! Signal-flow graph representation and validation.
//!
//! This module provides the in-memory directed multigraph consumed by the
//! Mason analysis. The [`SignalFlowGraph`] struct holds nodes, gain-labelled
//! branches and an adjacency index keyed by node id.

mod model;
mod snapshot;
mod types;
mod validate;

pub use model::SignalFlowGraph;
pub use snapshot::{BranchSnapshot, GraphSnapshot, NodeSnapshot};
pub use types::*;
pub use validate::validate_graph;
