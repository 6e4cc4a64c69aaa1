//! WASM bindings for Sigflow Core.
//!
//! This module provides JavaScript-friendly bindings for a browser graph
//! editor. Results cross the boundary as JSON strings.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmSignalFlowGraph, check_stability_json } from 'sigflow_core';
//!
//! await init();
//!
//! const graph = new WasmSignalFlowGraph();
//! const a = graph.add_node("N1");
//! const b = graph.add_node("N2");
//! graph.add_branch(a, b, "g1");
//!
//! const analysis = JSON.parse(graph.analyze(false));
//! console.log(analysis.transferFunction);
//!
//! const routh = JSON.parse(check_stability_json("s^3+3s^2+3s+1"));
//! console.log(routh.verdict);
//! ```

use wasm_bindgen::prelude::*;

use crate::graph::{GraphSnapshot, NodeId, SignalFlowGraph};
use crate::mason::{self, AnalysisConfig, CombinationOrder};
use crate::routh;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn config(all_orders: bool) -> AnalysisConfig {
    let order = if all_orders {
        CombinationOrder::All
    } else {
        CombinationOrder::Pairs
    };
    AnalysisConfig::new().with_combination_order(order)
}

/// WASM-compatible signal-flow graph.
///
/// Mirrors the editor's actions: nodes are added one at a time, branches
/// connect existing nodes, and `analyze` returns the full Mason result.
#[wasm_bindgen]
pub struct WasmSignalFlowGraph {
    graph: SignalFlowGraph,
}

#[wasm_bindgen]
impl WasmSignalFlowGraph {
    /// Create an empty graph.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmSignalFlowGraph {
        WasmSignalFlowGraph {
            graph: SignalFlowGraph::new(),
        }
    }

    /// Add a node and return its id.
    #[wasm_bindgen]
    pub fn add_node(&mut self, name: &str) -> u64 {
        self.graph.add_node(name).0
    }

    /// Rename an existing node.
    #[wasm_bindgen]
    pub fn rename_node(&mut self, id: u64, name: &str) -> Result<(), JsValue> {
        self.graph.rename_node(NodeId(id), name).map_err(to_js)
    }

    /// Add a branch between two existing nodes.
    #[wasm_bindgen]
    pub fn add_branch(&mut self, from: u64, to: u64, gain: &str) -> Result<(), JsValue> {
        self.graph
            .add_branch(NodeId(from), NodeId(to), gain)
            .map(|_| ())
            .map_err(to_js)
    }

    /// Remove all nodes and branches.
    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.graph.clear();
    }

    /// Number of nodes in the graph.
    #[wasm_bindgen(getter)]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Run the Mason analysis and return it as JSON.
    ///
    /// # Arguments
    /// * `all_orders` - include triples and larger non-touching groups
    #[wasm_bindgen]
    pub fn analyze(&self, all_orders: bool) -> Result<String, JsValue> {
        let analysis = mason::analyze(&self.graph, &config(all_orders)).map_err(to_js)?;
        serde_json::to_string(&analysis).map_err(to_js)
    }

    /// Export the graph as a `{nodes, branches}` JSON snapshot.
    #[wasm_bindgen]
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&GraphSnapshot::from(&self.graph)).map_err(to_js)
    }
}

impl Default for WasmSignalFlowGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Analyze a `{nodes, branches}` JSON snapshot and return the result as JSON.
#[wasm_bindgen]
pub fn analyze_graph_json(snapshot_json: &str, all_orders: bool) -> Result<String, JsValue> {
    let graph = GraphSnapshot::from_json(snapshot_json)
        .and_then(|s| s.to_graph())
        .map_err(to_js)?;
    let analysis = mason::analyze(&graph, &config(all_orders)).map_err(to_js)?;
    serde_json::to_string(&analysis).map_err(to_js)
}

/// Check a polynomial and return the Routh report as JSON.
#[wasm_bindgen]
pub fn check_stability_json(polynomial: &str) -> Result<String, JsValue> {
    let report = routh::check_stability(polynomial).map_err(to_js)?;
    serde_json::to_string(&report).map_err(to_js)
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
