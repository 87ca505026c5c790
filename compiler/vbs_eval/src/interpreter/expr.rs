//! Expression evaluation.
//!
//! Expressions evaluate to slots rather than values: a name yields the
//! variable's own slot, which is what assignment writes through and what a
//! byref parameter aliases. Literals and operator results get fresh slots.

use std::rc::Rc;

use vbs_ir::{BinaryOp, Expr, ExprKind, Name};
use vbs_stack::ensure_sufficient_stack;

use super::hoist::literal_value;
use super::Interpreter;
use crate::errors::{member_not_found, object_required, undeclared_variable, unsupported};
use crate::{
    evaluate_binary, evaluate_unary, ContextId, EvalResult, FunctionValue, Slot, Value,
};

impl Interpreter {
    /// Evaluate `expr` to the slot holding its value.
    pub fn evaluate(&mut self, expr: &Expr, context: ContextId) -> EvalResult<Slot> {
        ensure_sufficient_stack(|| self.evaluate_inner(expr, context))
    }

    fn evaluate_inner(&mut self, expr: &Expr, context: ContextId) -> EvalResult<Slot> {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(Slot::new(literal_value(literal))),
            ExprKind::Variable(name) => self.resolve_variable(name, context),
            ExprKind::Access { object, member } => {
                let object = self.evaluate_operand(object, context)?.get();
                member_slot(&object, member, false)
            }
            ExprKind::WithMember(member) => {
                let object = self.with_object()?;
                member_slot(&object, member, false)
            }
            ExprKind::Call { callee, args } => self.evaluate_call(callee, args, context),
            ExprKind::New(path) => {
                let path: Vec<&str> = path.iter().map(Name::as_str).collect();
                Err(unsupported(format!("new {}", path.join("."))))
            }
            // Identity compares the referenced values themselves, so a
            // function name is not invoked.
            ExprKind::Binary {
                op: BinaryOp::Is,
                left,
                right,
            } => {
                let left = self.evaluate(left, context)?.get();
                let right = self.evaluate(right, context)?.get();
                evaluate_binary(&left, &right, BinaryOp::Is).map(Slot::new)
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.evaluate_operand(left, context)?.get();
                let right = self.evaluate_operand(right, context)?.get();
                evaluate_binary(&left, &right, *op).map(Slot::new)
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.evaluate_operand(operand, context)?.get();
                evaluate_unary(&operand, *op).map(Slot::new)
            }
        }
    }

    /// Evaluate in value position (operand, assigned value, argument,
    /// condition). A bare reference to a parameterless script function
    /// calls it.
    pub fn evaluate_operand(&mut self, expr: &Expr, context: ContextId) -> EvalResult<Slot> {
        let slot = self.evaluate(expr, context)?;
        if !expr.is_reference() {
            return Ok(slot);
        }
        let function = slot.with(|value| match value {
            Value::Function(FunctionValue::Interpreted(function))
                if function.decl.params.is_empty() =>
            {
                Some(Rc::clone(function))
            }
            _ => None,
        });
        match function {
            Some(function) => self.call_interpreted(&function, &[], context),
            None => Ok(slot),
        }
    }

    /// Evaluate an assignment target. Unlike [`evaluate`](Self::evaluate),
    /// a missing object member is created.
    pub(super) fn evaluate_place(&mut self, expr: &Expr, context: ContextId) -> EvalResult<Slot> {
        match &expr.kind {
            ExprKind::Access { object, member } => {
                let object = self.evaluate_operand(object, context)?.get();
                member_slot(&object, member, true)
            }
            ExprKind::WithMember(member) => {
                let object = self.with_object()?;
                member_slot(&object, member, true)
            }
            _ => self.evaluate(expr, context),
        }
    }

    pub(super) fn resolve_variable(&mut self, name: &Name, context: ContextId) -> EvalResult<Slot> {
        self.env
            .resolve(context, name, true)
            .ok_or_else(|| undeclared_variable(name.as_str()))
    }

    fn with_object(&self) -> EvalResult<Value> {
        self.with_stack
            .last()
            .map(Slot::get)
            .ok_or_else(|| object_required("with"))
    }
}

fn member_slot(object: &Value, member: &Name, create: bool) -> EvalResult<Slot> {
    match object {
        Value::Object(object) if create => Ok(object.get_or_insert(member)),
        Value::Object(object) => object
            .get(member.as_str())
            .ok_or_else(|| member_not_found(member.as_str())),
        _ => Err(object_required(member.as_str())),
    }
}
