//! Evaluator tests running parsed scripts end to end.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod call_tests;
mod operators_tests;

use std::cell::RefCell;
use std::rc::Rc;

use vbs_ir::Name;
use vbs_lexer::{lex, LexMode};
use vbs_parse::parse;

use crate::{ContextId, EvalConfig, EvalResult, Interpreter, ObjectValue, Slot, Value};

/// A script run: the interpreter, the page frame, and everything the
/// script passed to `print`.
pub(super) struct Run {
    pub interp: Interpreter,
    pub page: ContextId,
    pub output: Rc<RefCell<Vec<String>>>,
}

impl Run {
    pub fn value(&self, name: &str) -> Value {
        self.interp
            .lookup(self.page, name)
            .unwrap_or_else(|| panic!("{name} is not defined"))
            .get()
    }

    pub fn output(&self) -> Vec<String> {
        self.output.borrow().clone()
    }
}

/// Set up a host frame with `print` and an `obj` object holding `a = 1`
/// and `b = 2`, then a page frame below it.
pub(super) fn prepare(config: EvalConfig) -> Run {
    let mut interp = Interpreter::new(config);
    let output = Rc::new(RefCell::new(Vec::new()));

    let env = interp.env_mut();
    let host = env.push_root();
    let sink = Rc::clone(&output);
    let print = Value::native("print", move |args: &[Slot]| {
        let mut line = String::new();
        for arg in args {
            line.push_str(&arg.get().to_text()?);
        }
        sink.borrow_mut().push(line);
        Ok(Slot::new(Value::Empty))
    });
    env.declare_readonly(host, Name::new("print"), print)
        .unwrap();
    let set_ten = Value::native("setten", |args: &[Slot]| {
        for arg in args {
            arg.set(Value::Number(10.0))
                .map_err(|_| crate::errors::host("argument is read-only"))?;
        }
        Ok(Slot::new(Value::Empty))
    });
    env.declare_readonly(host, Name::new("setten"), set_ten)
        .unwrap();
    env.freeze(host);

    let page = env.push(host);
    let obj = ObjectValue::new()
        .with_member("a", Value::Number(1.0))
        .with_member("b", Value::Number(2.0));
    env.declare(page, Name::new("obj"), Value::object(obj))
        .unwrap();

    Run {
        interp,
        page,
        output,
    }
}

pub(super) fn try_run_with(source: &str, config: EvalConfig) -> (Run, EvalResult<()>) {
    let block = parse(&lex(source, LexMode::Code)).expect("script should parse");
    let mut run = prepare(config);
    let result = run.interp.run_block(&block, run.page);
    (run, result)
}

pub(super) fn try_run(source: &str) -> (Run, EvalResult<()>) {
    try_run_with(source, EvalConfig::default())
}

pub(super) fn run(source: &str) -> Run {
    let (run, result) = try_run(source);
    result.expect("script should run");
    run
}

pub(super) fn run_error(source: &str) -> crate::EvalErrorKind {
    let (_, result) = try_run(source);
    result.expect_err("script should fail").kind
}
