//! Statement execution.

use vbs_ir::{Block, Expr, ExitKind, Name, OnErrorKind, Stmt, StmtKind};
use vbs_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::errors::{readonly_write, type_mismatch, unsupported};
use crate::{compare_equal, ContextId, EvalResult, Value};

impl Interpreter {
    /// Execute the statements of `block` in order.
    pub fn execute_block(&mut self, block: &Block, context: ContextId) -> EvalResult<()> {
        for stmt in &block.stmts {
            self.execute(stmt, context)
                .map_err(|err| err.or_span(stmt.span))?;
        }
        Ok(())
    }

    /// Hoist then execute `block`: the whole life of a page or body.
    pub fn run_block(&mut self, block: &Block, context: ContextId) -> EvalResult<()> {
        self.hoist_block(block, context)?;
        self.execute_block(block, context)
    }

    pub fn execute(&mut self, stmt: &Stmt, context: ContextId) -> EvalResult<()> {
        ensure_sufficient_stack(|| self.execute_inner(stmt, context))
    }

    fn execute_inner(&mut self, stmt: &Stmt, context: ContextId) -> EvalResult<()> {
        match &stmt.kind {
            StmtKind::Block(block) => self.execute_block(block, context),
            StmtKind::Assignment { target, value } => {
                let value = self.evaluate_operand(value, context)?.get();
                let slot = self.evaluate_place(target, context)?;
                slot.set(value)
                    .map_err(|_| readonly_write(target.to_string()))
            }
            StmtKind::Call(call) => self.evaluate(call, context).map(drop),
            StmtKind::Dim { .. }
            | StmtKind::Const { .. }
            | StmtKind::Function(_)
            | StmtKind::Class { .. }
            | StmtKind::Property { .. } => Ok(()),
            StmtKind::ReDim { name, .. } => Err(unsupported(format!("redim {name}"))),
            StmtKind::Exit(kind) => Err(unsupported(format!("exit {}", exit_keyword(*kind)))),
            StmtKind::OnError(kind) => Err(unsupported(match kind {
                OnErrorKind::ResumeNext => "on error resume next",
                OnErrorKind::GotoZero => "on error goto 0",
            })),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.evaluate_operand(cond, context)?.get().is_truthy()? {
                    self.execute_block(then_branch, context)
                } else {
                    self.execute_block(else_branch, context)
                }
            }
            StmtKind::Loop {
                cond,
                body,
                until,
                post_condition,
            } => self.execute_loop(cond, body, *until, *post_condition, context),
            StmtKind::For {
                var,
                from,
                to,
                step,
                body,
            } => self.execute_for(var, [from, to, step], body, context),
            StmtKind::ForEach {
                var,
                collection,
                body,
            } => self.execute_for_each(var, collection, body, context),
            StmtKind::Select { subject, cases } => {
                let subject = self.evaluate_operand(subject, context)?.get();
                for case in cases {
                    let matched = match &case.conditions {
                        None => true,
                        Some(conditions) => self.any_equal(&subject, conditions, context)?,
                    };
                    if matched {
                        return self.execute_block(&case.body, context);
                    }
                }
                Ok(())
            }
            StmtKind::With { object, body } => {
                let object = self.evaluate_operand(object, context)?;
                self.with_stack.push(object);
                let result = self.execute_block(body, context);
                self.with_stack.pop();
                result
            }
            StmtKind::Option { on, .. } => {
                self.env.set_explicit(context, *on);
                Ok(())
            }
            StmtKind::Include(include) => match &include.resolved {
                Some(resolved) => self.execute_block(resolved, context),
                None => Err(unsupported(format!(
                    "unresolved #include \"{}\"",
                    include.file
                ))),
            },
        }
    }

    fn execute_loop(
        &mut self,
        cond: &Expr,
        body: &Block,
        until: bool,
        post_condition: bool,
        context: ContextId,
    ) -> EvalResult<()> {
        // `until c` runs while the condition is false.
        let proceed = |interp: &mut Self| -> EvalResult<bool> {
            Ok(interp.evaluate_operand(cond, context)?.get().is_truthy()? != until)
        };
        if !post_condition && !proceed(self)? {
            return Ok(());
        }
        loop {
            self.execute_block(body, context)?;
            if !proceed(self)? {
                return Ok(());
            }
        }
    }

    /// `from`, `to` and `step` are evaluated once, before the first pass.
    fn execute_for(
        &mut self,
        var: &Name,
        [from, to, step]: [&Expr; 3],
        body: &Block,
        context: ContextId,
    ) -> EvalResult<()> {
        let from = self.evaluate_operand(from, context)?.get().to_number()?;
        let to = self.evaluate_operand(to, context)?.get().to_number()?;
        let step = self.evaluate_operand(step, context)?.get().to_number()?;
        let counter = self.resolve_variable(var, context)?;
        let write = |value: f64| {
            counter
                .set(Value::Number(value))
                .map_err(|_| readonly_write(var.as_str()))
        };

        write(from)?;
        loop {
            let current = counter.get().to_number()?;
            let done = if step >= 0.0 {
                current > to
            } else {
                current < to
            };
            if done {
                return Ok(());
            }
            self.execute_block(body, context)?;
            let current = counter.get().to_number()?;
            write(current + step)?;
        }
    }

    fn execute_for_each(
        &mut self,
        var: &Name,
        collection: &Expr,
        body: &Block,
        context: ContextId,
    ) -> EvalResult<()> {
        let items = match self.evaluate_operand(collection, context)?.get() {
            Value::Object(object) => object.values(),
            Value::Empty => return Ok(()),
            other => {
                return Err(type_mismatch(
                    format!("'{collection}' is not a collection"),
                    other.type_name(),
                ))
            }
        };
        let element = self.resolve_variable(var, context)?;
        for item in items {
            element
                .set(item.get())
                .map_err(|_| readonly_write(var.as_str()))?;
            self.execute_block(body, context)?;
        }
        Ok(())
    }

    fn any_equal(
        &mut self,
        subject: &Value,
        conditions: &[Expr],
        context: ContextId,
    ) -> EvalResult<bool> {
        for condition in conditions {
            let value = self.evaluate_operand(condition, context)?.get();
            if compare_equal(subject, &value)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn exit_keyword(kind: ExitKind) -> &'static str {
    match kind {
        ExitKind::Function => "function",
        ExitKind::Sub => "sub",
        ExitKind::Property => "property",
        ExitKind::Do => "do",
        ExitKind::For => "for",
    }
}
