//! Code-region tokens recognised by logos.

use logos::{Lexer, Logos};

/// Raw token inside `<% ... %>` (or a whole code-mode file).
///
/// Keywords match case-insensitively; identifiers are folded later.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
pub(crate) enum RawToken {
    #[token("'", skip_comment)]
    #[token("rem", skip_comment, ignore(ascii_case))]
    Comment,

    #[token("\n")]
    Newline,

    #[regex(r"_[ \t]*\r?\n")]
    LineContinuation,

    #[token("%>")]
    CloseCode,

    #[token("and", ignore(ascii_case))]
    And,
    #[token("byref", ignore(ascii_case))]
    ByRef,
    #[token("byval", ignore(ascii_case))]
    ByVal,
    #[token("call", ignore(ascii_case))]
    Call,
    #[token("case", ignore(ascii_case))]
    Case,
    #[token("class", ignore(ascii_case))]
    Class,
    #[token("const", ignore(ascii_case))]
    Const,
    #[token("dim", ignore(ascii_case))]
    Dim,
    #[token("do", ignore(ascii_case))]
    Do,
    #[token("each", ignore(ascii_case))]
    Each,
    #[token("else", ignore(ascii_case))]
    Else,
    #[token("elseif", ignore(ascii_case))]
    ElseIf,
    #[token("empty", ignore(ascii_case))]
    Empty,
    #[token("end", ignore(ascii_case))]
    End,
    #[token("exit", ignore(ascii_case))]
    Exit,
    #[token("false", ignore(ascii_case))]
    False,
    #[token("for", ignore(ascii_case))]
    For,
    #[token("function", ignore(ascii_case))]
    Function,
    #[token("if", ignore(ascii_case))]
    If,
    #[token("is", ignore(ascii_case))]
    Is,
    #[token("loop", ignore(ascii_case))]
    Loop,
    #[token("mod", ignore(ascii_case))]
    Mod,
    #[token("new", ignore(ascii_case))]
    New,
    #[token("next", ignore(ascii_case))]
    Next,
    #[token("not", ignore(ascii_case))]
    Not,
    #[token("nothing", ignore(ascii_case))]
    Nothing,
    #[token("null", ignore(ascii_case))]
    Null,
    #[token("option", ignore(ascii_case))]
    Option,
    #[token("or", ignore(ascii_case))]
    Or,
    #[token("private", ignore(ascii_case))]
    Private,
    #[token("property", ignore(ascii_case))]
    Property,
    #[token("public", ignore(ascii_case))]
    Public,
    #[token("redim", ignore(ascii_case))]
    ReDim,
    #[token("select", ignore(ascii_case))]
    Select,
    #[token("set", ignore(ascii_case))]
    Set,
    #[token("sub", ignore(ascii_case))]
    Sub,
    #[token("then", ignore(ascii_case))]
    Then,
    #[token("to", ignore(ascii_case))]
    To,
    #[token("true", ignore(ascii_case))]
    True,
    #[token("until", ignore(ascii_case))]
    Until,
    #[token("wend", ignore(ascii_case))]
    Wend,
    #[token("while", ignore(ascii_case))]
    While,
    #[token("with", ignore(ascii_case))]
    With,
    #[token("xor", ignore(ascii_case))]
    Xor,

    #[token("&")]
    Amp,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("\\")]
    Backslash,
    #[token("^")]
    Caret,
    #[token("=")]
    Eq,
    #[token("<>")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,

    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", parse_decimal)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_decimal)]
    #[regex(r"&[hH][0-9a-fA-F]+&?", parse_hex)]
    Number(f64),

    #[regex(r#""([^"\n]|"")*""#, unescape_string)]
    String(String),

    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*")]
    Ident,
}

/// Consume a comment body up to (not including) the line break or `%>`.
fn skip_comment(lex: &mut Lexer<'_, RawToken>) {
    let rest = lex.remainder();
    let line_end = rest.find('\n').unwrap_or(rest.len());
    let close = rest.find("%>").unwrap_or(rest.len());
    lex.bump(line_end.min(close));
}

fn parse_decimal(lex: &mut Lexer<'_, RawToken>) -> Option<f64> {
    lex.slice().parse().ok()
}

fn parse_hex(lex: &mut Lexer<'_, RawToken>) -> Option<f64> {
    let digits = lex.slice()[2..].trim_end_matches('&');
    u64::from_str_radix(digits, 16).ok().map(|n| n as f64)
}

fn unescape_string(lex: &mut Lexer<'_, RawToken>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].replace("\"\"", "\"")
}
