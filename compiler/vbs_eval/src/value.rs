//! Runtime values and their VBScript coercions.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use vbs_ir::{FunctionDecl, Name};

use crate::errors::{invalid_use_of_null, type_mismatch};
use crate::{ContextId, EvalResult, Slot};

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    String(String),
    Number(f64),
    Boolean(bool),
    Empty,
    Null,
    Nothing,
    Object(Rc<ObjectValue>),
    Function(FunctionValue),
}

impl Value {
    #[inline]
    pub fn string(text: impl Into<String>) -> Self {
        Value::String(text.into())
    }

    pub fn object(object: ObjectValue) -> Self {
        Value::Object(Rc::new(object))
    }

    /// Wrap a host closure as a callable value.
    pub fn native(
        name: &str,
        func: impl Fn(&[Slot]) -> EvalResult<Slot> + 'static,
    ) -> Self {
        Value::Function(FunctionValue::Native(Rc::new(NativeFunction::new(
            name, func,
        ))))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "String",
            Value::Number(_) => "Number",
            Value::Boolean(_) => "Boolean",
            Value::Empty => "Empty",
            Value::Null => "Null",
            Value::Nothing => "Nothing",
            Value::Object(_) => "Object",
            Value::Function(_) => "Function",
        }
    }

    /// Numeric coercion shared by every operator.
    ///
    /// `True` is `-1`. Strings must hold a number after trimming; `&H`
    /// hex is accepted.
    pub fn to_number(&self) -> EvalResult<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            Value::Boolean(true) => Ok(-1.0),
            Value::Boolean(false) | Value::Empty | Value::Nothing => Ok(0.0),
            Value::Null => Err(invalid_use_of_null("numeric conversion")),
            Value::String(text) => parse_numeric_text(text)
                .ok_or_else(|| type_mismatch(format!("\"{text}\" is not a number"), "String")),
            Value::Object(_) | Value::Function(_) => {
                Err(type_mismatch("numeric conversion", self.type_name()))
            }
        }
    }

    /// Condition truth: any non-zero number.
    pub fn is_truthy(&self) -> EvalResult<bool> {
        Ok(self.to_number()? != 0.0)
    }

    /// Text for `&` and `Response.Write`. `Null` writes nothing; objects and
    /// functions have no text form.
    pub fn to_text(&self) -> EvalResult<String> {
        match self {
            Value::String(text) => Ok(text.clone()),
            Value::Object(_) | Value::Function(_) => {
                Err(type_mismatch("conversion to text", self.type_name()))
            }
            _ => Ok(self.to_string()),
        }
    }
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix("&H").or_else(|| text.strip_prefix("&h")) {
        let hex = hex.strip_suffix('&').unwrap_or(hex);
        return u64::from_str_radix(hex, 16).ok().map(|n| n as f64);
    }
    // `f64::from_str` also takes "inf" and "NaN", which are not numbers here.
    let numeric = text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !numeric || !text.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl PartialEq for Value {
    /// Structural for scalars, identity for objects and functions.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Empty, Value::Empty)
            | (Value::Null, Value::Null)
            | (Value::Nothing, Value::Nothing) => true,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(text) => f.write_str(text),
            // Rust already prints integral floats without `.0`; only the
            // sign of zero needs folding.
            Value::Number(n) if *n == 0.0 => f.write_str("0"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Boolean(true) => f.write_str("True"),
            Value::Boolean(false) => f.write_str("False"),
            Value::Empty | Value::Null => Ok(()),
            Value::Nothing => f.write_str("Nothing"),
            Value::Object(_) => f.write_str("[object]"),
            Value::Function(func) => write!(f, "[function {}]", func.name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(text) => f.debug_tuple("String").field(text).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Value::Empty => f.write_str("Empty"),
            Value::Null => f.write_str("Null"),
            Value::Nothing => f.write_str("Nothing"),
            Value::Object(object) => f.debug_tuple("Object").field(object).finish(),
            Value::Function(func) => f.debug_tuple("Function").field(func.name()).finish(),
        }
    }
}

/// A dictionary of named slots that remembers insertion order.
///
/// Host objects (`Response`, `Request`) and script-created members share
/// this representation; `for each` walks the members in the order they
/// were added.
#[derive(Default)]
pub struct ObjectValue {
    members: RefCell<Members>,
}

#[derive(Default)]
struct Members {
    slots: FxHashMap<Name, Slot>,
    order: Vec<Name>,
}

impl ObjectValue {
    pub fn new() -> Self {
        ObjectValue::default()
    }

    /// Builder form of [`insert`](Self::insert) with a writable slot.
    #[must_use]
    pub fn with_member(self, name: &str, value: Value) -> Self {
        self.insert(Name::new(name), Slot::new(value));
        self
    }

    /// Add or replace a member. A replaced member keeps its position.
    pub fn insert(&self, name: Name, slot: Slot) {
        let mut members = self.members.borrow_mut();
        if members.slots.insert(name.clone(), slot).is_none() {
            members.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Slot> {
        self.members.borrow().slots.get(name).cloned()
    }

    /// The member's slot, created as `Empty` if missing.
    pub fn get_or_insert(&self, name: &Name) -> Slot {
        if let Some(slot) = self.get(name.as_str()) {
            return slot;
        }
        let slot = Slot::new(Value::Empty);
        self.insert(name.clone(), slot.clone());
        slot
    }

    /// Member slots in insertion order.
    pub fn values(&self) -> Vec<Slot> {
        let members = self.members.borrow();
        members
            .order
            .iter()
            .filter_map(|name| members.slots.get(name).cloned())
            .collect()
    }

    pub fn names(&self) -> Vec<Name> {
        self.members.borrow().order.clone()
    }

    pub fn len(&self) -> usize {
        self.members.borrow().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// A callable value.
#[derive(Clone)]
pub enum FunctionValue {
    Native(Rc<NativeFunction>),
    Interpreted(Rc<InterpretedFunction>),
}

impl FunctionValue {
    pub fn name(&self) -> &Name {
        match self {
            FunctionValue::Native(native) => &native.name,
            FunctionValue::Interpreted(func) => &func.decl.name,
        }
    }

    pub fn ptr_eq(&self, other: &FunctionValue) -> bool {
        match (self, other) {
            (FunctionValue::Native(a), FunctionValue::Native(b)) => Rc::ptr_eq(a, b),
            (FunctionValue::Interpreted(a), FunctionValue::Interpreted(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// A host function. Receives the argument slots as evaluated, so it may
/// write through them.
pub struct NativeFunction {
    name: Name,
    func: Box<dyn Fn(&[Slot]) -> EvalResult<Slot>>,
}

impl NativeFunction {
    pub fn new(name: &str, func: impl Fn(&[Slot]) -> EvalResult<Slot> + 'static) -> Self {
        NativeFunction {
            name: Name::new(name),
            func: Box::new(func),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn call(&self, args: &[Slot]) -> EvalResult<Slot> {
        (self.func)(args)
    }
}

/// A script function closed over the frame it was declared in.
pub struct InterpretedFunction {
    pub decl: Arc<FunctionDecl>,
    pub context: ContextId,
}
