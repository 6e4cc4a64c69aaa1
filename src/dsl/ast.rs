//! Abstract Syntax Tree types for the graph description language.

/// Complete AST representation of a parsed graph description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphAst {
    /// Nodes in order of first appearance
    pub nodes: Vec<NodeDecl>,
    /// Branch definitions in source order
    pub branches: Vec<BranchDef>,
    /// Input node name (`.input`)
    pub input_node: Option<String>,
    /// Output node name (`.output`)
    pub output_node: Option<String>,
}

impl GraphAst {
    /// Create a new empty graph AST.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a node declaration by name.
    pub fn node(&self, name: &str) -> Option<&NodeDecl> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

/// A node, declared with `.node` or introduced by a branch.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDecl {
    /// Name used to reference the node in the description
    pub name: String,
    /// Display label (`.node x "label"`)
    pub label: Option<String>,
    /// Source line number for error reporting
    pub line: usize,
}

/// A branch line: `<from> -> <to> [gain]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchDef {
    pub from: String,
    pub to: String,
    /// Gain text, `1` when omitted
    pub gain: String,
    /// Source line number for error reporting
    pub line: usize,
}
