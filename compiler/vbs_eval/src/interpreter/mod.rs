//! Tree-walking interpreter for VBScript.
//!
//! The interpreter owns the frame arena and walks the AST directly:
//!
//! - `hoist` - declaration pass over a frame's statements
//! - `exec` - statement execution
//! - `expr` - expression evaluation to slots
//! - `call` - native and interpreted function dispatch
//!
//! Every evaluation takes the [`ContextId`] of the frame it runs in.
//! Control structures run in the frame of the enclosing function or page;
//! only interpreted calls create frames, parented at the frame the function
//! was declared in.

mod call;
mod exec;
mod expr;
mod hoist;
mod scope_guard;

pub use scope_guard::CallFrame;

use crate::{ContextId, EvalConfig, Environment, Slot};

/// Tree-walking interpreter.
pub struct Interpreter {
    pub(crate) env: Environment,
    /// Objects of the enclosing `with` blocks, innermost last.
    with_stack: Vec<Slot>,
    config: EvalConfig,
    /// Interpreted calls currently on the stack.
    depth: usize,
}

impl Interpreter {
    pub fn new(config: EvalConfig) -> Self {
        Interpreter {
            env: Environment::new(),
            with_stack: Vec::new(),
            config,
            depth: 0,
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Mutable access for seeding host values before a run.
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Current interpreted call depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Find `name` as seen from `context`.
    pub fn lookup(&self, context: ContextId, name: &str) -> Option<Slot> {
        self.env.lookup(context, name)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new(EvalConfig::default())
    }
}
