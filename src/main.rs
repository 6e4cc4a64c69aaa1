//! Sigflow - Signal-Flow Graph and Stability Analyzer
//!
//! # Usage
//!
//! ```bash
//! sigflow graph feedback.sfg --orders all
//! sigflow routh "s^5+s^4+10s^3+72s^2+152s+240"
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sigflow_core::{
    dsl,
    error::Result,
    mason::{self, Analysis},
    routh, AnalysisConfig, CombinationOrder, NodeId, RouthReport, SignalFlowGraph, Verdict,
};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

/// Signal-flow graph and Routh-Hurwitz stability analyzer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the transfer function of a graph description file (.sfg)
    Graph {
        #[arg(value_name = "GRAPH_FILE")]
        graph_file: PathBuf,

        /// Non-touching loop groups to include in the determinants
        #[arg(long, value_enum, default_value_t = CombinationOrder::Pairs)]
        orders: CombinationOrder,

        /// Treat single-branch self-loops as loops
        #[arg(long)]
        self_loops: bool,
    },
    /// Check the stability of a characteristic polynomial
    Routh {
        /// Polynomial in s, e.g. "s^3+3s^2+3s+1"
        #[arg(value_name = "POLYNOMIAL")]
        polynomial: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    SubscriberBuilder::default()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Graph {
            graph_file,
            orders,
            self_loops,
        } => {
            tracing::info!(file = %graph_file.display(), "analyzing graph");
            let ast = dsl::parse_file(&graph_file)?;
            let graph = SignalFlowGraph::from_ast(ast)?;
            let config = AnalysisConfig::new()
                .with_combination_order(orders)
                .with_self_loops(self_loops);
            let analysis = mason::analyze(&graph, &config)?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_analysis(&graph, &analysis);
            }
        }
        Command::Routh { polynomial } => {
            tracing::info!(%polynomial, "checking stability");
            let report = routh::check_stability(&polynomial)?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
    }

    Ok(())
}

fn node_names(graph: &SignalFlowGraph, nodes: &[NodeId]) -> String {
    nodes
        .iter()
        .map(|id| graph.node_name(*id).unwrap_or("?"))
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn print_analysis(graph: &SignalFlowGraph, analysis: &Analysis) {
    println!("Forward paths:");
    for (i, path) in analysis.forward_paths.iter().enumerate() {
        println!("  P{} = {}    [{}]", i + 1, path.gain, node_names(graph, &path.nodes));
    }

    println!("Loops:");
    for (i, lp) in analysis.loops.iter().enumerate() {
        println!("  L{} = {}    [{}]", i + 1, lp.gain, node_names(graph, &lp.nodes));
    }

    if !analysis.non_touching_loops.is_empty() {
        println!("Non-touching loops:");
        for group in &analysis.non_touching_loops {
            println!("  {} loops: {}", group.order(), group.gain);
        }
    }

    println!("Determinants:");
    for (label, value) in analysis.deltas.labeled() {
        println!("  {} = {}", label, value);
    }

    println!("{}", analysis.transfer_function);
}

fn print_report(report: &RouthReport) {
    if !report.table.is_empty() {
        println!("Routh array:");
        let degree = report.table.len() - 1;
        for (i, row) in report.table.iter().enumerate() {
            let cells: Vec<String> = row.iter().map(|v| format!("{:10.4}", v)).collect();
            println!("  s^{:<3}{}", degree - i, cells.join(" "));
        }
    }

    println!("Result: {}", report.verdict);
    if report.verdict == Verdict::FailsNecessaryCondition {
        println!("Poles in RHS: {}", report.poles.join(", "));
    } else if !report.poles.is_empty() {
        println!(
            "Poles in RHS (estimated): {} pole(s) - {}",
            report.poles.len(),
            report.poles.join(", ")
        );
    }
}
