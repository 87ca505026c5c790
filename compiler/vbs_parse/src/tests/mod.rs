//! Parser tests, compared through the s-expression rendering.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod decl;
mod expr;
mod page;

use vbs_ir::{Block, Expr, Stmt};
use vbs_lexer::{lex, LexMode};

use crate::{parse, parse_expression, ParseError};

pub(super) fn parse_code(source: &str) -> Result<Block, ParseError> {
    parse(&lex(source, LexMode::Code))
}

pub(super) fn parse_page(source: &str) -> Result<Block, ParseError> {
    parse(&lex(source, LexMode::Markup))
}

pub(super) fn expr(source: &str) -> Expr {
    parse_expression(&lex(source, LexMode::Code)).expect("expression should parse")
}

/// Render each top-level statement of a code-mode source.
pub(super) fn render(source: &str) -> Vec<String> {
    let block = parse_code(source).expect("source should parse");
    block.stmts.iter().map(ToString::to_string).collect()
}

/// The single statement of a code-mode source.
pub(super) fn single(source: &str) -> Stmt {
    let mut block = parse_code(source).expect("source should parse");
    assert_eq!(block.len(), 1, "expected one statement in {source:?}");
    block.stmts.remove(0)
}
