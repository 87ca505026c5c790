//! Shared intermediate representation for the VBScript interpreter.
//!
//! - [`Span`]: byte range into a source file
//! - [`Name`]: case-folded identifier
//! - [`Token`], [`TokenKind`], [`TokenList`]: lexer output
//! - [`ast`]: statement and expression trees consumed by the evaluator
//! - [`LineOffsetTable`]: byte offset to line/column mapping for diagnostics

pub mod ast;
mod line_table;
mod name;
mod span;
mod token;

pub use ast::{
    AccessLevel, BinaryOp, Block, CallArg, Expr, ExprKind, ExitKind, FunctionDecl, FunctionKind,
    Include, Literal, OnErrorKind, OptionKind, Param, PropertyKind, SelectCase, Stmt, StmtKind,
    UnaryOp,
};
pub use line_table::LineOffsetTable;
pub use name::Name;
pub use span::Span;
pub use token::{Token, TokenFlags, TokenKind, TokenList};
