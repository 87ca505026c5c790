//! Parse errors.

use vbs_ir::{Span, TokenKind};

/// A grammar violation at `span`. Parsing stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }

    /// `expected <what>, found <token>`.
    #[cold]
    pub fn expected(what: &str, found: &TokenKind, span: Span) -> Self {
        ParseError::new(format!("expected {what}, found {}", found.describe()), span)
    }
}
