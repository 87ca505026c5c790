use pretty_assertions::assert_eq;

use super::parse_page;

fn render_page(source: &str) -> Vec<String> {
    let block = parse_page(source).expect("page should parse");
    block.stmts.iter().map(ToString::to_string).collect()
}

#[test]
fn test_text_and_code_regions() {
    assert_eq!(
        render_page("header<% doThing : dim x %>footer"),
        vec![
            "(block (call (. response write) \"header\"))",
            "(call dothing)",
            "(block (dim x))",
            "(block (call (. response write) \"footer\"))",
        ]
    );
}

#[test]
fn test_plain_text_page() {
    assert_eq!(
        render_page("just text"),
        vec!["(block (call (. response write) \"just text\"))"]
    );
    assert!(parse_page("").expect("empty page").is_empty());
}

#[test]
fn test_text_inside_if() {
    assert_eq!(
        render_page("<% if x then %>yes<% end if %>"),
        vec!["(if x (then (block (call (. response write) \"yes\"))))"]
    );
}

#[test]
fn test_print_blocks_join_surrounding_text() {
    assert_eq!(
        render_page("a<%= 1 + 2 %>b"),
        vec![
            "(block (call (. response write) \"a\") (call (. response write) (+ 1 2)) (call (. response write) \"b\"))"
        ]
    );
}

#[test]
fn test_print_requires_close() {
    assert!(parse_page("<%= 1 2 %>").is_err());
}

#[test]
fn test_include_between_text() {
    assert_eq!(
        render_page("x<!-- #include file=\"inc.asp\" -->y"),
        vec![
            "(block (call (. response write) \"x\") (include file \"inc.asp\") (call (. response write) \"y\"))"
        ]
    );
    assert_eq!(
        render_page("<!--#INCLUDE VIRTUAL=\"/lib/a.asp\"-->"),
        vec!["(block (include virtual \"/lib/a.asp\"))"]
    );
}

#[test]
fn test_code_region_closed_by_end_of_file() {
    assert_eq!(
        render_page("text<% x = 1"),
        vec!["(block (call (. response write) \"text\"))", "(assign x 1)"]
    );
}

#[test]
fn test_leading_code_region() {
    assert_eq!(render_page("<%x = 1%>"), vec!["(assign x 1)"]);
}
