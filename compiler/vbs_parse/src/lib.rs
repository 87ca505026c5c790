//! Recursive-descent parser for VBScript and classic ASP pages.
//!
//! The grammar is split by area under [`grammar`]: expressions, simple
//! statements (calls and assignments), declarations, control flow and
//! literal page regions. Parsing stops at the first error.

mod cursor;
mod error;
mod grammar;

#[cfg(test)]
mod tests;

pub use cursor::Cursor;
pub use error::ParseError;

use tracing::debug;
use vbs_ir::{Block, Expr, TokenKind, TokenList};

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    /// Inside a `class` body, where `property` declarations are allowed.
    in_class: bool,
    /// Inside a function, sub or property body, where no further
    /// procedure or class may be declared.
    in_procedure: bool,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            in_class: false,
            in_procedure: false,
        }
    }

    /// Parse a whole page or script file.
    pub fn parse_script(&mut self) -> Result<Block, ParseError> {
        let block = self.parse_block_until(|_| false)?;
        if !self.cursor.is_at_end() {
            return Err(self.cursor.expected("statement"));
        }
        debug!(statements = block.len(), "parsed script");
        Ok(block)
    }

    /// Parse a single expression followed by end of input.
    pub fn parse_standalone_expr(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expr()?;
        if !self.cursor.check(&TokenKind::Eof) {
            return Err(self.cursor.expected("end of expression"));
        }
        Ok(expr)
    }
}

/// Parse a token stream into a top-level block.
pub fn parse(tokens: &TokenList) -> Result<Block, ParseError> {
    Parser::new(tokens).parse_script()
}

/// Parse a token stream holding one expression.
pub fn parse_expression(tokens: &TokenList) -> Result<Expr, ParseError> {
    Parser::new(tokens).parse_standalone_expr()
}
