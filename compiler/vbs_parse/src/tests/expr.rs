use pretty_assertions::assert_eq;
use vbs_ir::{ExprKind, Literal};
use vbs_lexer::{lex, LexMode};

use super::expr;
use crate::parse_expression;

fn number(source: &str) -> f64 {
    match expr(source).kind {
        ExprKind::Literal(Literal::Number(n)) => n,
        other => panic!("expected number literal, got {other:?}"),
    }
}

#[test]
fn test_numeric_literals() {
    assert_eq!(number("14"), 14.0);
    assert_eq!(number("14."), 14.0);
    assert_eq!(number(".87"), 0.87);
    assert_eq!(number("-14.87"), -14.87);
    assert_eq!(number("+14.87"), 14.87);
    assert_eq!(number("&H1F"), 31.0);
}

#[test]
fn test_string_literal_escaping() {
    let parsed = expr(r#""hello ""world""!""#);
    assert_eq!(
        parsed.kind,
        ExprKind::Literal(Literal::String("hello \"world\"!".to_string()))
    );
}

#[test]
fn test_keyword_literals() {
    assert_eq!(expr("True").to_string(), "true");
    assert_eq!(expr("EMPTY").to_string(), "empty");
    assert_eq!(expr("null").to_string(), "null");
    assert_eq!(expr("Nothing").to_string(), "nothing");
}

#[test]
fn test_precedence_table() {
    assert_eq!(
        expr("3 + 4 * (-2 - 3) = -17 and 3 < 4").to_string(),
        "(and (= (+ 3 (* 4 (- -2 3))) -17) (< 3 4))"
    );
}

#[test]
fn test_logical_tiers() {
    assert_eq!(
        expr("a or b and c xor d").to_string(),
        "(or a (and b (xor c d)))"
    );
    assert_eq!(expr("not a = b").to_string(), "(not (= a b))");
    assert_eq!(
        expr("false or true = (3 + 1 = 4 and not 1 = 2)").to_string(),
        "(or false (= true (and (= (+ 3 1) 4) (not (= 1 2)))))"
    );
}

#[test]
fn test_concat_binds_looser_than_arithmetic() {
    assert_eq!(expr("\"n=\" & 1 + 2").to_string(), "(& \"n=\" (+ 1 2))");
    assert_eq!(expr("a & b = c").to_string(), "(= (& a b) c)");
}

#[test]
fn test_mod_between_concat_and_additive() {
    assert_eq!(expr("a + b mod c").to_string(), "(mod (+ a b) c)");
    assert_eq!(expr("a mod b & c").to_string(), "(& (mod a b) c)");
}

#[test]
fn test_power_and_is() {
    assert_eq!(expr("2 * 3 ^ 2").to_string(), "(* 2 (^ 3 2))");
    assert_eq!(expr("a ^ b is c").to_string(), "(^ a (is b c))");
    assert_eq!(expr("x is nothing").to_string(), "(is x nothing)");
}

#[test]
fn test_signed_operand_after_power_and_is() {
    assert_eq!(expr("2 ^ -x").to_string(), "(^ 2 (neg x))");
    assert_eq!(expr("2 ^ +x").to_string(), "(^ 2 x)");
    assert_eq!(expr("2 ^ -3").to_string(), "(^ 2 -3)");
    assert_eq!(expr("a is -b").to_string(), "(is a (neg b))");
}

#[test]
fn test_not_after_comparison() {
    assert_eq!(expr("1 = not y").to_string(), "(= 1 (not y))");
    assert_eq!(expr("a <> not b and c").to_string(), "(and (<> a (not b)) c)");
}

#[test]
fn test_division_operators() {
    assert_eq!(expr("a / b \\ c * d").to_string(), "(* (\\ (/ a b) c) d)");
}

#[test]
fn test_negated_operand() {
    assert_eq!(expr("-x * 2").to_string(), "(* (neg x) 2)");
    assert_eq!(expr("a - -b").to_string(), "(- a (neg b))");
    assert_eq!(expr("a - 2").to_string(), "(- a 2)");
}

#[test]
fn test_comparisons_are_left_associative() {
    assert_eq!(expr("a < b = c").to_string(), "(= (< a b) c)");
    assert_eq!(expr("a <> b >= c").to_string(), "(>= (<> a b) c)");
}

#[test]
fn test_access_chains() {
    assert_eq!(
        expr("a.b(1, 2).c.d()").to_string(),
        "(call (. (. (call (. a b) 1 2) c) d))"
    );
    assert_eq!(expr("rs.Fields.Item(\"id\").Value").to_string(), "(. (call (. (. rs fields) item) \"id\") value)");
}

#[test]
fn test_keyword_member_names() {
    assert_eq!(expr("rs.eof").to_string(), "(. rs eof)");
    assert_eq!(expr("x.end").to_string(), "(. x end)");
    assert_eq!(expr("Request.Form.Class").to_string(), "(. (. request form) class)");
}

#[test]
fn test_parenthesized_chain_head() {
    assert_eq!(expr("(a).b").to_string(), "(. a b)");
}

#[test]
fn test_empty_application_requires_adjacent_parens() {
    assert_eq!(expr("foo()").to_string(), "(call foo)");
    assert!(parse_expression(&lex("foo( )", LexMode::Code)).is_err());
}

#[test]
fn test_parenthesized_arguments_are_marked() {
    let parsed = expr("f(x, (y), (a) + b)");
    let ExprKind::Call { args, .. } = parsed.kind else {
        panic!("expected call");
    };
    let marks: Vec<bool> = args.iter().map(|arg| arg.parenthesized).collect();
    assert_eq!(marks, vec![false, true, false]);
}

#[test]
fn test_new_expression() {
    assert_eq!(expr("new Scripting.Dictionary").to_string(), "(new scripting.dictionary)");
}

#[test]
fn test_with_member() {
    assert_eq!(expr(".Name & .Title").to_string(), "(& (. name) (. title))");
}

#[test]
fn test_missing_operand_is_error() {
    let err = parse_expression(&lex("1 +", LexMode::Code)).unwrap_err();
    assert_eq!(err.message, "expected expression, found end of file");
}

#[test]
fn test_trailing_tokens_are_error() {
    assert!(parse_expression(&lex("1 2", LexMode::Code)).is_err());
}
