//! # Sigflow Core
//!
//! Analysis engines for classical control-systems exercises.
//!
//! This library provides:
//! - Mason's gain formula over signal-flow graphs with symbolic gains
//! - Routh-Hurwitz stability checking of characteristic polynomials
//! - A small text language for describing signal-flow graphs
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`graph`] - Directed multigraph of nodes and gain-labelled branches
//! - [`gain`] - Textual gain algebra (multiply, add, normalize, simplify)
//! - [`mason`] - Forward paths, loops, non-touching groups and the transfer function
//! - [`routh`] - Polynomial parsing, Routh array and stability verdict
//! - [`dsl`] - Parser for the graph description language
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! sigflow graph feedback.sfg
//! sigflow routh "s^3+3s^2+3s+1" --json
//! ```
//!
//! ### Library
//!
//! ```
//! use sigflow_core::{mason, AnalysisConfig, SignalFlowGraph};
//!
//! let mut g = SignalFlowGraph::new();
//! let n1 = g.add_node("N1");
//! let n2 = g.add_node("N2");
//! let n3 = g.add_node("N3");
//! g.add_branch(n1, n2, "g1")?;
//! g.add_branch(n2, n3, "g2")?;
//! g.add_branch(n3, n2, "h1")?;
//!
//! let analysis = mason::analyze(&g, &AnalysisConfig::new())?;
//! assert_eq!(analysis.transfer_function, "T = (g1*g2) / (1-(g2*h1))");
//! # Ok::<(), sigflow_core::SigflowError>(())
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { analyze_graph_json, check_stability_json } from 'sigflow_core';
//!
//! const result = JSON.parse(analyze_graph_json(JSON.stringify(snapshot), false));
//! ```
//!
//! ## Computation Model
//!
//! Every entry point is a synchronous, pure function of the graph or
//! polynomial it is given. Nothing is cached between calls and repeated
//! calls on the same input produce identical output.

pub mod dsl;
pub mod error;
pub mod gain;
pub mod graph;
pub mod mason;
pub mod routh;

// Re-export main types for convenience
pub use error::{Result, SigflowError};
pub use gain::Gain;
pub use graph::{GraphSnapshot, NodeId, SignalFlowGraph};
pub use mason::{Analysis, AnalysisConfig, CombinationOrder};
pub use routh::{check_stability, RouthReport, Verdict};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmSignalFlowGraph;
