//! DSL (Domain Specific Language) parser for signal-flow graph descriptions.
//!
//! This module provides a small line-oriented language for writing down a
//! signal-flow graph by hand, so graphs can be analysed from files.
//!
//! # Grammar Overview
//!
//! ```text
//! graph     = { line }
//! line      = comment | directive | branch | empty
//! comment   = ('#' | ';') { any_char }
//! directive = '.node' name [label] | '.input' name | '.output' name
//! branch    = name '->' name [gain]
//! gain      = factor { '*' factor }
//! factor    = ['-'] (identifier | number)
//! name      = identifier | number
//! label     = '"' { any_char } '"'
//! ```
//!
//! Nodes are created in order of first appearance, whether in a `.node`
//! directive or a branch. Unless `.input`/`.output` say otherwise, the first
//! node is the input and the last node the output. A branch without a gain
//! has gain `1`.
//!
//! # Example
//!
//! ```text
//! # Single feedback loop
//! .node N1 "R(s)"
//! N1 -> N2 g1
//! N2 -> N3 g2
//! N3 -> N2 h1
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a graph DSL string into an AST.
pub fn parse(input: &str) -> Result<GraphAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a graph DSL file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<GraphAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::SigflowError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
