//! End-to-end checks of graph analysis and stability checking.

use approx::assert_relative_eq;
use sigflow_core::{
    check_stability, dsl, mason, AnalysisConfig, CombinationOrder, GraphSnapshot, NodeId,
    SigflowError, SignalFlowGraph, Verdict,
};

fn load(source: &str) -> SignalFlowGraph {
    SignalFlowGraph::from_ast(dsl::parse(source).unwrap()).unwrap()
}

#[test]
fn test_single_loop_from_snapshot() {
    let json = r#"{
        "nodes": [
            {"id": 1, "name": "N1"},
            {"id": 2, "name": "N2"},
            {"id": 3, "name": "N3"}
        ],
        "branches": [
            {"from": 1, "to": 2, "gain": "g1"},
            {"from": 2, "to": 3, "gain": "g2"},
            {"from": 3, "to": 2, "gain": "h1"}
        ]
    }"#;
    let graph = GraphSnapshot::from_json(json).unwrap().to_graph().unwrap();
    let analysis = mason::analyze(&graph, &AnalysisConfig::new()).unwrap();

    assert_eq!(analysis.forward_paths.len(), 1);
    assert_eq!(analysis.forward_paths[0].gain.to_string(), "g1*g2");
    assert_eq!(analysis.loops.len(), 1);
    assert_eq!(analysis.loops[0].gain.to_string(), "g2*h1");
    assert!(analysis.non_touching_loops.is_empty());
    assert_eq!(analysis.deltas.system, "1-(g2*h1)");
    assert_eq!(analysis.deltas.paths, vec!["1"]);
    assert_eq!(analysis.transfer_function, "T = (g1*g2) / (1-(g2*h1))");
}

#[test]
fn test_two_non_touching_loops() {
    let graph = load(include_str!("../demos/two_loops.sfg"));
    assert_eq!(graph.node_name(NodeId(1)), Some("R(s)"));
    assert_eq!(graph.output_node(), Some(NodeId(5)));

    let analysis = mason::analyze(&graph, &AnalysisConfig::new()).unwrap();

    assert_eq!(analysis.forward_paths.len(), 1);
    assert_eq!(analysis.forward_paths[0].gain.to_string(), "a*b*c*d");

    let gains: Vec<String> = analysis.loops.iter().map(|l| l.gain.to_string()).collect();
    assert_eq!(gains, vec!["b*h1", "d*h2"]);

    assert_eq!(analysis.non_touching_loops.len(), 1);
    assert_eq!(analysis.non_touching_loops[0].gain.to_string(), "b*h1*d*h2");

    assert_eq!(analysis.deltas.system, "1-(b*h1+d*h2)+(b*h1*d*h2)");
    assert_eq!(analysis.deltas.paths, vec!["1"]);
    assert_eq!(
        analysis.transfer_function,
        "T = (a*b*c*d) / (1-(b*h1+d*h2)+(b*h1*d*h2))"
    );
}

#[test]
fn test_cofactor_for_untouched_loop() {
    let graph = load(include_str!("../demos/parallel_paths.sfg"));
    let analysis = mason::analyze(&graph, &AnalysisConfig::new()).unwrap();

    let gains: Vec<String> = analysis
        .forward_paths
        .iter()
        .map(|p| p.gain.to_string())
        .collect();
    assert_eq!(gains, vec!["g1*g2", "g3*g4"]);
    assert_eq!(analysis.deltas.system, "1-(h1*k1)");
    assert_eq!(analysis.deltas.paths, vec!["1", "1-(h1*k1)"]);
    assert_eq!(
        analysis.transfer_function,
        "T = (g1*g2+g3*g4*1-(h1*k1)) / (1-(h1*k1))"
    );
}

#[test]
fn test_three_disjoint_loops_by_order() {
    let source = "\
        u -> a 1\n a -> b 1\n b -> c 1\n c -> y 1\n\
        a -> a2 p\n a2 -> a q\n\
        b -> b2 r\n b2 -> b s\n\
        c -> c2 t\n c2 -> c v\n\
        .output y\n";
    let graph = load(source);

    let pairs = mason::analyze(&graph, &AnalysisConfig::new()).unwrap();
    assert_eq!(pairs.non_touching_loops.len(), 3);
    assert_eq!(
        pairs.deltas.system,
        "1-(p*q+r*s+t*v)+(p*q*r*s+p*q*t*v+r*s*t*v)"
    );

    let config = AnalysisConfig::new().with_combination_order(CombinationOrder::All);
    let all = mason::analyze(&graph, &config).unwrap();
    assert_eq!(all.non_touching_loops.len(), 4);
    assert_eq!(
        all.deltas.system,
        "1-(p*q+r*s+t*v)+(p*q*r*s+p*q*t*v+r*s*t*v)-(p*q*r*s*t*v)"
    );
    assert_eq!(all.forward_paths[0].gain.to_string(), "1");
}

#[test]
fn test_disconnected_output() {
    let graph = load("a -> b g\nc -> a h\n");
    let analysis = mason::analyze(&graph, &AnalysisConfig::new()).unwrap();
    assert!(analysis.forward_paths.is_empty());
    assert_eq!(analysis.transfer_function, "T = (0) / (1)");
}

#[test]
fn test_small_graph_rejected_and_engine_reusable() {
    let mut graph = SignalFlowGraph::new();
    let a = graph.add_node("a");
    let err = mason::analyze(&graph, &AnalysisConfig::new()).unwrap_err();
    assert!(matches!(err, SigflowError::GraphTooSmall { .. }));

    let b = graph.add_node("b");
    graph.add_branch(a, b, "k").unwrap();
    let analysis = mason::analyze(&graph, &AnalysisConfig::new()).unwrap();
    assert_eq!(analysis.transfer_function, "T = (k) / (1)");
}

#[test]
fn test_routh_stable_example() {
    let report = check_stability("s^3+3s^2+3s+1").unwrap();
    assert_eq!(report.table[0], vec![1.0, 3.0]);
    assert_eq!(report.table[1], vec![3.0, 1.0]);
    assert_relative_eq!(report.table[2][0], 8.0 / 3.0);
    assert_relative_eq!(report.table[3][0], 1.0);
    assert_eq!(report.verdict, Verdict::Stable);
    assert_eq!(report.sign_change_count, 0);
    assert!(report.poles.is_empty());
}

#[test]
fn test_routh_necessary_condition_example() {
    let report = check_stability("s^2-s+1").unwrap();
    assert_eq!(
        report.verdict.to_string(),
        "Unstable: Coefficients have different signs"
    );
    assert!(report.table.is_empty());
}

#[test]
fn test_routh_fifth_order_unstable() {
    let report = check_stability("s^5+s^4+10s^3+72s^2+152s+240").unwrap();
    assert_eq!(report.table.len(), 6);
    assert_eq!(report.table[2], vec![-62.0, -88.0]);
    assert_eq!(report.verdict, Verdict::Unstable { sign_changes: 2 });
    assert_eq!(report.pole_estimates.len(), 3);
    assert!(report.pole_estimates.iter().all(|p| *p > 0.0));
}

#[test]
fn test_routh_errors_are_text() {
    let err = check_stability("s^2+x").unwrap_err();
    assert!(err.to_string().contains("'+x'"));
}
