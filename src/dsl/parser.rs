//! Parser for the graph description language.

use std::collections::HashSet;

use super::ast::*;
use super::lexer::{Lexer, Token, TokenKind};
use crate::error::{Result, SigflowError};
use crate::gain;

/// Parser for graph DSL.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire graph description.
    pub fn parse(&mut self) -> Result<GraphAst> {
        let mut ast = GraphAst::new();
        let mut declared = HashSet::new();

        while self.current.kind != TokenKind::Eof {
            // Skip empty lines
            if self.current.kind == TokenKind::Newline {
                self.advance()?;
                continue;
            }

            match &self.current.kind {
                TokenKind::Directive => self.parse_directive(&mut ast, &mut declared)?,
                TokenKind::Identifier | TokenKind::Number => {
                    let branch = self.parse_branch()?;
                    touch_node(&mut ast, &branch.from, branch.line);
                    touch_node(&mut ast, &branch.to, branch.line);
                    ast.branches.push(branch);
                }
                _ => {
                    return Err(SigflowError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::Eof => {}
                _ => {
                    return Err(SigflowError::parse(
                        self.current.line,
                        format!("unexpected trailing token: {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(SigflowError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn expect_name(&mut self) -> Result<String> {
        match self.current.kind {
            TokenKind::Identifier | TokenKind::Number => {
                let text = self.current.text.clone();
                self.advance()?;
                Ok(text)
            }
            _ => Err(SigflowError::parse(
                self.current.line,
                format!("expected node name, got {:?}", self.current.kind),
            )),
        }
    }

    fn parse_directive(&mut self, ast: &mut GraphAst, declared: &mut HashSet<String>) -> Result<()> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".input" => {
                ast.input_node = Some(self.expect_name()?);
            }
            ".output" => {
                ast.output_node = Some(self.expect_name()?);
            }
            ".node" => {
                let name = self.expect_name()?;
                let label = if self.current.kind == TokenKind::Str {
                    Some(self.expect(TokenKind::Str)?.text)
                } else {
                    None
                };
                if !declared.insert(name.clone()) {
                    return Err(SigflowError::DuplicateNode { name });
                }
                touch_node(ast, &name, line);
                if let Some(decl) = ast.nodes.iter_mut().find(|n| n.name == name) {
                    decl.label = label;
                }
            }
            _ => {
                return Err(SigflowError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    fn parse_branch(&mut self) -> Result<BranchDef> {
        let line = self.current.line;
        let from = self.expect_name()?;
        self.expect(TokenKind::Arrow)?;
        let to = self.expect_name()?;

        let gain = if matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof) {
            gain::UNITY.to_string()
        } else {
            self.parse_gain()?
        };

        Ok(BranchDef {
            from,
            to,
            gain,
            line,
        })
    }

    /// `gain := factor { '*' factor }`, `factor := ['-'] (identifier | number)`
    fn parse_gain(&mut self) -> Result<String> {
        let mut factors = vec![self.parse_factor()?];
        while self.current.kind == TokenKind::Star {
            self.advance()?;
            factors.push(self.parse_factor()?);
        }
        Ok(factors.join("*"))
    }

    fn parse_factor(&mut self) -> Result<String> {
        let mut text = String::new();
        if self.current.kind == TokenKind::Minus {
            text.push('-');
            self.advance()?;
        }
        match self.current.kind {
            TokenKind::Identifier | TokenKind::Number => {
                text.push_str(&self.current.text);
                self.advance()?;
                Ok(text)
            }
            _ => Err(SigflowError::parse(
                self.current.line,
                format!("expected gain factor, got {:?}", self.current.kind),
            )),
        }
    }
}

/// Record a node on first appearance.
fn touch_node(ast: &mut GraphAst, name: &str, line: usize) {
    if ast.node(name).is_none() {
        ast.nodes.push(NodeDecl {
            name: name.to_string(),
            label: None,
            line,
        });
    }
}
