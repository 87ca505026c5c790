//! Function dispatch.
//!
//! Arguments are evaluated in the caller's frame before the callee's frame
//! exists. A byref parameter given an unparenthesized place (`x`, `a.b`,
//! `.b`, `f(1)`) receives the caller's slot; every other argument is
//! copied into a fresh slot.

use tracing::debug;
use vbs_ir::{CallArg, Expr, ExprKind};

use super::Interpreter;
use crate::errors::{arity, type_mismatch};
use crate::{ContextId, EvalResult, FunctionValue, InterpretedFunction, Slot, Value};

impl Interpreter {
    pub(super) fn evaluate_call(
        &mut self,
        callee: &Expr,
        args: &[CallArg],
        context: ContextId,
    ) -> EvalResult<Slot> {
        match self.callee_value(callee, context)? {
            Value::Function(function) => self.call(&function, args, context),
            other => Err(type_mismatch(
                format!("'{callee}' is not a function"),
                other.type_name(),
            )),
        }
    }

    /// Inside a function body its own name is the return cell; calling that
    /// name recurses instead.
    fn callee_value(&mut self, callee: &Expr, context: ContextId) -> EvalResult<Value> {
        if let ExprKind::Variable(name) = &callee.kind {
            if self.env.function(context) == Some(name) {
                let outer = self
                    .env
                    .parent(context)
                    .and_then(|parent| self.env.lookup(parent, name.as_str()));
                if let Some(slot) = outer {
                    return Ok(slot.get());
                }
            }
        }
        Ok(self.evaluate(callee, context)?.get())
    }

    /// Call `function` with argument expressions evaluated in `context`.
    pub fn call(
        &mut self,
        function: &FunctionValue,
        args: &[CallArg],
        context: ContextId,
    ) -> EvalResult<Slot> {
        match function {
            FunctionValue::Native(native) => {
                let mut slots = Vec::with_capacity(args.len());
                for arg in args {
                    slots.push(self.evaluate_operand(&arg.value, context)?);
                }
                debug!(name = %native.name(), args = slots.len(), "native call");
                native.call(&slots)
            }
            FunctionValue::Interpreted(function) => {
                self.call_interpreted(function, args, context)
            }
        }
    }

    pub(super) fn call_interpreted(
        &mut self,
        function: &InterpretedFunction,
        args: &[CallArg],
        context: ContextId,
    ) -> EvalResult<Slot> {
        let decl = &function.decl;
        if args.len() != decl.params.len() {
            return Err(arity(decl.name.as_str(), decl.params.len(), args.len()));
        }

        let mut bound = Vec::with_capacity(args.len());
        for (param, arg) in decl.params.iter().zip(args) {
            let slot = if param.by_ref && !arg.parenthesized && arg.value.is_place() {
                self.evaluate_place(&arg.value, context)?
            } else {
                Slot::new(self.evaluate_operand(&arg.value, context)?.get())
            };
            bound.push(slot);
        }

        debug!(name = %decl.name, args = bound.len(), depth = self.depth, "call");
        // `with` objects are lexical: the callee does not see the caller's.
        let with_stack = std::mem::take(&mut self.with_stack);
        let result = self.run_function(function, bound);
        self.with_stack = with_stack;
        result
    }

    fn run_function(&mut self, function: &InterpretedFunction, args: Vec<Slot>) -> EvalResult<Slot> {
        let decl = &function.decl;
        let mut frame = self.enter_frame(function.context)?;
        let id = frame.id();
        frame.env.set_function(id, decl.name.clone());
        let result = frame.env.declare(id, decl.name.clone(), Value::Empty)?;
        for (param, slot) in decl.params.iter().zip(args) {
            frame.env.bind(id, param.name.clone(), slot);
        }
        frame.hoist_block(&decl.body, id)?;
        frame.execute_block(&decl.body, id)?;
        Ok(result)
    }
}
