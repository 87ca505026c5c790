//! Function dispatch: argument passing, return cells, hoisting and frame
//! lifetime.

use pretty_assertions::assert_eq;

use super::{run, run_error, try_run_with};
use crate::{EvalConfig, EvalErrorKind, Value};

const INC: &str = "\
sub inc(byref n)
  n = n + 1
end sub
";

#[test]
fn test_byref_aliases_unparenthesized_argument() {
    let run = run(&format!(
        "{INC}\
x = 1
inc x
y = 1
inc (y)
z = 1
call inc(z)
inc obj.a
inc (obj.b)"
    ));
    assert_eq!(run.value("x"), Value::Number(2.0));
    assert_eq!(run.value("y"), Value::Number(1.0));
    assert_eq!(run.value("z"), Value::Number(2.0));
    let Value::Object(obj) = run.value("obj") else {
        panic!("obj should be an object");
    };
    assert_eq!(obj.get("a").unwrap().get(), Value::Number(2.0));
    assert_eq!(obj.get("b").unwrap().get(), Value::Number(2.0));
}

#[test]
fn test_byval_is_the_default() {
    let run = run("\
sub set_default(n)
  n = 5
end sub
sub set_byval(byval n)
  n = 5
end sub
a = 1
set_default a
b = 1
set_byval b");
    assert_eq!(run.value("a"), Value::Number(1.0));
    assert_eq!(run.value("b"), Value::Number(1.0));
}

#[test]
fn test_parenthesized_first_argument_is_byval() {
    let run = run("\
sub both(byref a, byref b)
  a = a + 1
  b = b + 1
end sub
p = 1
q = 1
both (p), q");
    assert_eq!(run.value("p"), Value::Number(1.0));
    assert_eq!(run.value("q"), Value::Number(2.0));
}

#[test]
fn test_expression_arguments_are_copied() {
    let run = run(&format!("{INC}x = 1\ninc x + 0"));
    assert_eq!(run.value("x"), Value::Number(1.0));
}

#[test]
fn test_return_by_name_assignment() {
    let run = run("\
function add(a, b)
  add = a + b
end function
function nothing_set()
end function
r = add(2, 3)
e = nothing_set()");
    assert_eq!(run.value("r"), Value::Number(5.0));
    assert_eq!(run.value("e"), Value::Empty);
}

#[test]
fn test_logical_operators_evaluate_both_sides() {
    let run = run("\
function l()
  print \"l\"
  l = false
end function
function r()
  print \"r\"
  r = true
end function
x = l() and r()
y = r() or l()");
    assert_eq!(run.output(), vec!["l", "r", "r", "l"]);
    assert_eq!(run.value("x"), Value::Boolean(false));
    assert_eq!(run.value("y"), Value::Boolean(true));
}

#[test]
fn test_precedence_through_calls() {
    let run = run("\
function two()
  two = 2
end function
x = 1 + two() * 3 ^ 2
y = not 1 = 2 and 2 > 1
s = \"a\" & 1 + 2");
    assert_eq!(run.value("x"), Value::Number(19.0));
    assert_eq!(run.value("y"), Value::Boolean(true));
    assert_eq!(run.value("s"), Value::string("a3"));
}

#[test]
fn test_functions_are_hoisted() {
    let run = run("\
r = later(2)
function later(n)
  later = n * 10
end function");
    assert_eq!(run.value("r"), Value::Number(20.0));
}

#[test]
fn test_const_is_readonly() {
    assert_eq!(
        run_error("const c = 1\nc = 2"),
        EvalErrorKind::ReadonlyWrite {
            name: "c".to_string()
        }
    );
    assert_eq!(
        run_error("print = 1"),
        EvalErrorKind::ReadonlyWrite {
            name: "print".to_string()
        }
    );
}

#[test]
fn test_redeclaration_in_one_frame() {
    assert_eq!(
        run_error("dim a\ndim a"),
        EvalErrorKind::Redeclaration {
            name: "a".to_string()
        }
    );
    assert_eq!(
        run_error("function f()\nend function\nsub f\nend sub"),
        EvalErrorKind::Redeclaration {
            name: "f".to_string()
        }
    );
}

#[test]
fn test_arity_mismatch() {
    assert_eq!(
        run_error("function f(a)\nend function\nx = f(1, 2)"),
        EvalErrorKind::Arity {
            name: "f".to_string(),
            expected: 1,
            got: 2,
        }
    );
}

#[test]
fn test_calling_a_non_function() {
    assert!(matches!(
        run_error("x = 1\nx 2"),
        EvalErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn test_recursion() {
    let run = run("\
function fact(n)
  if n <= 1 then
    fact = 1
  else
    fact = n * fact(n - 1)
  end if
end function
r = fact(5)");
    assert_eq!(run.value("r"), Value::Number(120.0));
    assert_eq!(run.interp.depth(), 0);
    assert_eq!(run.interp.env().len(), 2);
}

#[test]
fn test_runaway_recursion_stops() {
    let config = EvalConfig::default().with_max_call_depth(16);
    let (run, result) = try_run_with(
        "function down(n)\n  down = down(n + 1)\nend function\nx = down(0)",
        config,
    );
    assert!(matches!(
        result.unwrap_err().kind,
        EvalErrorKind::StackOverflow { .. }
    ));
    // Every frame was released on the way out.
    assert_eq!(run.interp.depth(), 0);
    assert_eq!(run.interp.env().len(), 2);
}

#[test]
fn test_parameterless_function_is_invoked_by_name() {
    let run = run("\
function five
  five = 5
end function
x = five + 1
y = five
same = five is five");
    assert_eq!(run.value("x"), Value::Number(6.0));
    assert_eq!(run.value("y"), Value::Number(5.0));
    assert_eq!(run.value("same"), Value::Boolean(true));
}

#[test]
fn test_static_scoping() {
    let run = run("\
function getx()
  getx = x
end function
sub caller()
  dim x
  x = \"local\"
  print getx()
end sub
x = \"global\"
caller");
    assert_eq!(run.output(), vec!["global"]);
}

#[test]
fn test_locals_stay_in_call_frame() {
    let run = run("\
sub bump
  counter = counter + 1
  scratch = 1
end sub
counter = 0
bump
bump");
    assert_eq!(run.value("counter"), Value::Number(2.0));
    assert!(run.interp.lookup(run.page, "scratch").is_none());
}

#[test]
fn test_native_function_writes_through_argument() {
    let run = run("x = 1\nsetten x\nsetten 5\ncall print(\"done\")");
    assert_eq!(run.value("x"), Value::Number(10.0));
    assert_eq!(run.output(), vec!["done"]);
}

#[test]
fn test_with_object_is_not_seen_by_callee() {
    assert!(matches!(
        run_error("sub show\n  print .a\nend sub\nwith obj\n  show\nend with"),
        EvalErrorKind::ObjectRequired { .. }
    ));
}
