use pretty_assertions::assert_eq;
use vbs_ir::{PropertyKind, StmtKind};

use super::{parse_code, render, single};

#[test]
fn test_dim_forms() {
    assert_eq!(
        render("dim a, b(), c(3, 4)"),
        vec!["(block (dim a) (dim b []) (dim c [3 4]))"]
    );
    assert_eq!(render("Private x"), vec!["(block (dim private x))"]);
    assert_eq!(render("public y"), vec!["(block (dim y))"]);
}

#[test]
fn test_dim_bounds_must_be_integers() {
    assert!(parse_code("dim a(1.5)").is_err());
    assert!(parse_code("dim a(n)").is_err());
}

#[test]
fn test_redim() {
    assert_eq!(
        render("redim preserve a(n + 1), b(2, m)"),
        vec!["(block (redim preserve a (+ n 1)) (redim preserve b 2 m))"]
    );
}

#[test]
fn test_const() {
    assert_eq!(render("const PI = 3.14"), vec!["(const pi 3.14)"]);
    assert_eq!(render("const LOW = -1"), vec!["(const low -1)"]);
    assert_eq!(
        render("private const A = \"x\", B = true"),
        vec!["(block (const a \"x\") (const b true))"]
    );
    assert!(parse_code("const X = 1 + 2").is_err());
}

#[test]
fn test_function_and_sub() {
    assert_eq!(
        render("function add(byref a, byval b, c)\nadd = a + b + c\nend function"),
        vec!["(function add (byref a b c) (assign add (+ (+ a b) c)))"]
    );
    assert_eq!(render("Sub Hello\nEnd Sub"), vec!["(sub hello ())"]);
    assert_eq!(render("private sub p()\nend sub"), vec!["(private sub p ())"]);
}

#[test]
fn test_mismatched_function_end() {
    assert!(parse_code("function f\nend sub").is_err());
}

#[test]
fn test_class() {
    assert_eq!(
        render(
            "class MyClass\n  dim a\n  public function test()\n  end function\nend class"
        ),
        vec!["(class myclass (block (dim a)) (function test ()))"]
    );
}

#[test]
fn test_class_properties() {
    let stmt = single(
        "class Person\n\
         private m_name\n\
         public default property get Name\n  Name = m_name\nend property\n\
         property let Name(value)\n  m_name = value\nend property\n\
         property set Owner(o)\nend property\n\
         end class",
    );
    let StmtKind::Class { members, .. } = stmt.kind else {
        panic!("expected class");
    };
    let kinds: Vec<(PropertyKind, bool)> = members
        .iter()
        .filter_map(|member| match &member.kind {
            StmtKind::Property {
                kind, is_default, ..
            } => Some((*kind, *is_default)),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            (PropertyKind::Get, true),
            (PropertyKind::Let, false),
            (PropertyKind::Set, false),
        ]
    );
}

#[test]
fn test_property_outside_class_is_error() {
    assert!(parse_code("property get x\nend property").is_err());
}

#[test]
fn test_nested_procedures_are_rejected() {
    let err = parse_code("sub outer\n  function inner\n  end function\nend sub").unwrap_err();
    assert_eq!(err.message, "`function` cannot be declared inside a procedure");
    assert!(parse_code("function f\n  private sub g\n  end sub\nend function").is_err());
    assert!(parse_code("sub s\n  class c\n  end class\nend sub").is_err());
    assert!(parse_code("class c\n  sub m\n    sub n\n    end sub\n  end sub\nend class").is_err());
}

#[test]
fn test_procedures_after_a_procedure_still_parse() {
    assert!(parse_code("sub a\nend sub\nsub b\nend sub\nclass c\n  sub m\n  end sub\nend class").is_ok());
}

#[test]
fn test_statements_not_allowed_in_class() {
    assert!(parse_code("class c\nx = 1\nend class").is_err());
}
