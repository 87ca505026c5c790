//! VBS Eval - tree-walking evaluator for VBScript pages.
//!
//! # Architecture
//!
//! - [`Value`]: the tagged runtime value with VBScript coercions
//! - [`Slot`]: the shared mutable cell every variable lives in; byref
//!   arguments alias the caller's slot
//! - [`Environment`]: arena of scope frames addressed by [`ContextId`]
//! - [`Interpreter`]: the hoist pass, statement execution, expression
//!   evaluation and function dispatch
//! - [`evaluate_binary`] / [`evaluate_unary`]: operator semantics
//!
//! A page is run in two passes over the same tree. `hoist_block` registers
//! every `dim`, `const` and function of a frame up front, so code may call a
//! function defined further down the page; `execute_block` then runs the
//! statements in order.

mod config;
mod environment;
pub mod errors;
pub mod interpreter;
mod operators;
mod slot;
mod value;

pub use config::EvalConfig;
pub use environment::{ContextId, Environment};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::Interpreter;
pub use operators::{compare_equal, evaluate_binary, evaluate_unary};
pub use slot::{ReadonlySlot, Slot};
pub use value::{FunctionValue, InterpretedFunction, NativeFunction, ObjectValue, Value};

#[cfg(test)]
mod tests;
