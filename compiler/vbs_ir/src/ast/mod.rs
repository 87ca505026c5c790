//! Syntax tree for VBScript pages.
//!
//! Two closed families, [`ExprKind`] and [`StmtKind`]; the evaluator and the
//! include preprocessor match on them exhaustively. Function bodies sit
//! behind `Arc` so a hoisted closure can hold its definition without copying
//! it, and so a parsed page can be cached and shared between renders.

mod display;

use std::sync::Arc;

use crate::{Name, Span};

/// A literal value as written in source.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Boolean(bool),
    Empty,
    Null,
    Nothing,
}

/// Binary operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// `\`, integer division.
    IntDiv,
    Pow,
    Mod,
    /// `&`
    Concat,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    Xor,
    Is,
}

impl BinaryOp {
    /// Source spelling.
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::IntDiv => "\\",
            BinaryOp::Pow => "^",
            BinaryOp::Mod => "mod",
            BinaryOp::Concat => "&",
            BinaryOp::Eq => "=",
            BinaryOp::NotEq => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Xor => "xor",
            BinaryOp::Is => "is",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    /// Negation of a non-literal operand; `-2` is a literal.
    Neg,
}

impl UnaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "not",
            UnaryOp::Neg => "neg",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// True for expressions that denote a storage location: the forms a
    /// byref parameter can alias.
    pub fn is_place(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Variable(_)
                | ExprKind::Access { .. }
                | ExprKind::WithMember(_)
                | ExprKind::Call { .. }
        )
    }

    /// True for a bare name or member reference (no application).
    pub fn is_reference(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Variable(_) | ExprKind::Access { .. } | ExprKind::WithMember(_)
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Variable(Name),
    /// `object.member`
    Access { object: Box<Expr>, member: Name },
    /// `.member` inside a `with` block.
    WithMember(Name),
    /// Function application or sub call.
    Call { callee: Box<Expr>, args: Vec<CallArg> },
    /// `new Dotted.Name`
    New(Vec<Name>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary { op: UnaryOp, operand: Box<Expr> },
}

/// One call argument.
#[derive(Clone, Debug, PartialEq)]
pub struct CallArg {
    pub value: Expr,
    /// The argument was written as a single parenthesized expression,
    /// which forces byval passing.
    pub parenthesized: bool,
}

impl CallArg {
    pub fn new(value: Expr, parenthesized: bool) -> Self {
        CallArg {
            value,
            parenthesized,
        }
    }
}

/// A statement list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Block { stmts }
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stmts.len()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    #[inline]
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AccessLevel {
    #[default]
    Public,
    Private,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FunctionKind {
    Function,
    Sub,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: Name,
    pub by_ref: bool,
}

/// A `function` or `sub` definition.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub name: Name,
    pub kind: FunctionKind,
    pub params: Vec<Param>,
    pub body: Block,
    pub access: AccessLevel,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    Get,
    Let,
    Set,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectCase {
    /// `None` for `case else`.
    pub conditions: Option<Vec<Expr>>,
    pub body: Block,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitKind {
    Function,
    Sub,
    Property,
    Do,
    For,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OnErrorKind {
    ResumeNext,
    GotoZero,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OptionKind {
    Explicit,
}

/// `#include` directive, filled in by the preprocessor.
#[derive(Clone, Debug, PartialEq)]
pub struct Include {
    pub file: String,
    pub is_virtual: bool,
    pub resolved: Option<Block>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Block(Block),
    Assignment { target: Expr, value: Expr },
    /// Call statement; the expression is always `ExprKind::Call`.
    Call(Expr),
    Const { name: Name, value: Literal },
    Dim {
        name: Name,
        /// `None` for a scalar, `Some(vec![])` for `name()`.
        dimensions: Option<Vec<u32>>,
        access: AccessLevel,
    },
    ReDim {
        name: Name,
        dimensions: Vec<Expr>,
        preserve: bool,
    },
    Function(Arc<FunctionDecl>),
    Class { name: Name, members: Vec<Stmt> },
    Property {
        kind: PropertyKind,
        function: Arc<FunctionDecl>,
        is_default: bool,
    },
    If {
        cond: Expr,
        then_branch: Block,
        else_branch: Block,
    },
    Loop {
        cond: Expr,
        body: Block,
        until: bool,
        post_condition: bool,
    },
    For {
        var: Name,
        from: Expr,
        to: Expr,
        step: Expr,
        body: Block,
    },
    ForEach {
        var: Name,
        collection: Expr,
        body: Block,
    },
    Select { subject: Expr, cases: Vec<SelectCase> },
    With { object: Expr, body: Block },
    Exit(ExitKind),
    OnError(OnErrorKind),
    Option { kind: OptionKind, on: bool },
    Include(Include),
}
