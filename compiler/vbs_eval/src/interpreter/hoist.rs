//! Declaration pass.
//!
//! Runs over a frame's statements before any of them execute, so a page
//! can call a function defined further down and `Option Explicit` code can
//! use a variable whose `dim` comes later. Nested blocks are walked into
//! the same frame.

use std::rc::Rc;
use std::sync::Arc;

use tracing::debug;
use vbs_ir::{Block, Literal, Stmt, StmtKind};

use super::Interpreter;
use crate::errors::unsupported;
use crate::{ContextId, EvalResult, FunctionValue, InterpretedFunction, Value};

impl Interpreter {
    /// Register the declarations of `block` in `context`.
    pub fn hoist_block(&mut self, block: &Block, context: ContextId) -> EvalResult<()> {
        for stmt in &block.stmts {
            self.hoist(stmt, context)
                .map_err(|err| err.or_span(stmt.span))?;
        }
        Ok(())
    }

    fn hoist(&mut self, stmt: &Stmt, context: ContextId) -> EvalResult<()> {
        match &stmt.kind {
            StmtKind::Dim { name, .. } => {
                debug!(%name, "hoist dim");
                self.env.declare_unique(context, name.clone(), Value::Empty)?;
            }
            StmtKind::Const { name, value } => {
                debug!(%name, "hoist const");
                self.env
                    .declare_readonly(context, name.clone(), literal_value(value))?;
            }
            StmtKind::Function(decl) => {
                // Only reachable through an include spliced into a body; the
                // parser rejects nested declarations written in place.
                if self.env.function(context).is_some() {
                    return Err(unsupported(format!(
                        "declaring {} inside a procedure",
                        decl.name
                    )));
                }
                debug!(name = %decl.name, "hoist function");
                let function = InterpretedFunction {
                    decl: Arc::clone(decl),
                    context,
                };
                let value = Value::Function(FunctionValue::Interpreted(Rc::new(function)));
                self.env.declare_unique(context, decl.name.clone(), value)?;
            }
            StmtKind::Block(block) => self.hoist_block(block, context)?,
            StmtKind::If {
                then_branch,
                else_branch,
                ..
            } => {
                self.hoist_block(then_branch, context)?;
                self.hoist_block(else_branch, context)?;
            }
            StmtKind::Loop { body, .. }
            | StmtKind::For { body, .. }
            | StmtKind::ForEach { body, .. }
            | StmtKind::With { body, .. } => self.hoist_block(body, context)?,
            StmtKind::Select { cases, .. } => {
                for case in cases {
                    self.hoist_block(&case.body, context)?;
                }
            }
            StmtKind::Property { function, .. } => self.hoist_block(&function.body, context)?,
            StmtKind::Include(include) => {
                if let Some(resolved) = &include.resolved {
                    self.hoist_block(resolved, context)?;
                }
            }
            StmtKind::Class { .. }
            | StmtKind::Assignment { .. }
            | StmtKind::Call(_)
            | StmtKind::ReDim { .. }
            | StmtKind::Exit(_)
            | StmtKind::OnError(_)
            | StmtKind::Option { .. } => {}
        }
        Ok(())
    }
}

pub(super) fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::String(text) => Value::String(text.clone()),
        Literal::Number(n) => Value::Number(*n),
        Literal::Boolean(b) => Value::Boolean(*b),
        Literal::Empty => Value::Empty,
        Literal::Null => Value::Null,
        Literal::Nothing => Value::Nothing,
    }
}
