//! Signal-flow graph analysis with Mason's gain formula.
//!
//! The analysis runs in four stages over a graph snapshot:
//!
//! 1. [`find_all_paths`] - simple forward paths from input to output
//! 2. [`find_all_loops`] - cycles, canonicalized and merged by gain
//! 3. [`find_non_touching`] - groups of node-disjoint loops
//! 4. [`assemble`] - Δ, the path cofactors Δk and the transfer function
//!
//! Each stage is a pure function of its inputs. [`analyze`] runs them all and
//! recomputes everything on every call.

pub mod assemble;
mod loops;
mod nontouching;
mod paths;

pub use assemble::{determinant, path_cofactor, transfer_function, Determinants};
pub use loops::{find_all_loops, find_raw_loops, loop_signature, merge_loops, MergedLoop, RawLoop};
pub use nontouching::{find_non_touching, NonTouchingSet};
pub use paths::{find_all_paths, ForwardPath};

use serde::Serialize;

use crate::error::{Result, SigflowError};
use crate::graph::{validate_graph, SignalFlowGraph};

/// Largest group of mutually non-touching loops taken into the determinants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum CombinationOrder {
    /// Pairs only
    #[default]
    Pairs,
    /// Pairs, triples and every larger group
    All,
}

/// Configuration for graph analysis.
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    /// Which non-touching groups enter Δ and Δk.
    pub combination_order: CombinationOrder,
    /// Record single-branch `v -> v` loops.
    pub include_self_loops: bool,
}

impl AnalysisConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the non-touching combination order.
    pub fn with_combination_order(mut self, order: CombinationOrder) -> Self {
        self.combination_order = order;
        self
    }

    /// Enable or disable self-loop detection.
    pub fn with_self_loops(mut self, include: bool) -> Self {
        self.include_self_loops = include;
        self
    }
}

/// Complete result of a Mason analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub forward_paths: Vec<ForwardPath>,
    pub loops: Vec<MergedLoop>,
    pub non_touching_loops: Vec<NonTouchingSet>,
    pub deltas: Determinants,
    pub transfer_function: String,
}

/// Run the full Mason analysis on a graph.
///
/// Graphs with fewer than two nodes are rejected with
/// [`SigflowError::GraphTooSmall`] before any enumeration starts.
pub fn analyze(graph: &SignalFlowGraph, config: &AnalysisConfig) -> Result<Analysis> {
    validate_graph(graph)?;

    let (input, output) = match (graph.input_node(), graph.output_node()) {
        (Some(i), Some(o)) => (i, o),
        _ => {
            return Err(SigflowError::GraphTooSmall {
                nodes: graph.node_count(),
            })
        }
    };

    let forward_paths = find_all_paths(graph, input, output);
    let loops = find_all_loops(graph, config.include_self_loops);
    let non_touching_loops = find_non_touching(&loops, config.combination_order);

    let loop_refs: Vec<&MergedLoop> = loops.iter().collect();
    let deltas = Determinants {
        system: determinant(&loop_refs, &non_touching_loops),
        paths: forward_paths
            .iter()
            .map(|p| path_cofactor(p, &loops, config.combination_order))
            .collect(),
    };
    let transfer_function = transfer_function(&forward_paths, &deltas);

    tracing::debug!(
        paths = forward_paths.len(),
        loops = loops.len(),
        groups = non_touching_loops.len(),
        "analysis complete"
    );

    Ok(Analysis {
        forward_paths,
        loops,
        non_touching_loops,
        deltas,
        transfer_function,
    })
}
