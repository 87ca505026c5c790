//! Runtime errors.
//!
//! `EvalErrorKind` is the structured category; `EvalError` pairs it with the
//! source location of the statement that failed. Factory functions are the
//! public way to build errors so every site produces the same message for
//! the same condition.
//!
//! Errors are not recoverable inside a page (`on error` is not executed), so
//! every failure propagates with `?` up to the driver.

use vbs_ir::{BinaryOp, Span};

/// Result of evaluation.
pub type EvalResult<T> = Result<T, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("variable is undefined: '{name}'")]
    UndeclaredVariable { name: String },

    #[error("type mismatch: {context} (got {found})")]
    TypeMismatch {
        context: String,
        found: &'static str,
    },

    #[error("cannot assign to read-only '{name}'")]
    ReadonlyWrite { name: String },

    #[error("name redefined: '{name}'")]
    Redeclaration { name: String },

    #[error("wrong number of arguments to '{name}': expected {expected}, got {got}")]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("not supported: {feature}")]
    Unsupported { feature: String },

    #[error("division by zero in `{}`", .op.as_symbol())]
    DivisionByZero { op: BinaryOp },

    #[error("invalid use of Null in {operation}")]
    InvalidUseOfNull { operation: String },

    #[error("object required: '{name}'")]
    ObjectRequired { name: String },

    #[error("object doesn't support member '{member}'")]
    MemberNotFound { member: String },

    #[error("out of stack space (call depth limit {depth})")]
    StackOverflow { depth: usize },

    #[error("{message}")]
    Host { message: String },
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Statement that raised the error, filled in as the error leaves it.
    pub span: Option<Span>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError { kind, span: None }
    }

    /// Attach `span` unless a more precise location is already recorded.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::from_kind(kind)
    }
}

// Factory functions

#[cold]
pub fn undeclared_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndeclaredVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn type_mismatch(context: impl Into<String>, found: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        context: context.into(),
        found,
    })
}

#[cold]
pub fn readonly_write(name: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReadonlyWrite { name: name.into() })
}

#[cold]
pub fn redeclaration(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Redeclaration {
        name: name.to_string(),
    })
}

#[cold]
pub fn arity(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Arity {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn unsupported(feature: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Unsupported {
        feature: feature.into(),
    })
}

#[cold]
pub fn division_by_zero(op: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero { op })
}

#[cold]
pub fn invalid_use_of_null(operation: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUseOfNull {
        operation: operation.into(),
    })
}

#[cold]
pub fn object_required(name: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ObjectRequired { name: name.into() })
}

#[cold]
pub fn member_not_found(member: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MemberNotFound {
        member: member.to_string(),
    })
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

/// Failure reported by a native host function.
#[cold]
pub fn host(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Host {
        message: message.into(),
    })
}
