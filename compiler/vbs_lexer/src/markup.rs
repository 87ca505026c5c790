//! Literal page text between code regions.
//!
//! Scanned by hand: the only structure here is `<%`, `<%=` and the
//! `#include` comment directive, everything else is opaque text.

use vbs_ir::{Span, Token, TokenFlags, TokenKind, TokenList};

/// Scan literal text from `start`. Emits `Text` and `Include` tokens, then
/// the code opener. Returns the offset just past the opener, or `None` when
/// the page ends in literal text.
pub(crate) fn lex_markup(source: &str, start: usize, out: &mut TokenList) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut text_start = start;
    let mut i = start;

    while i < bytes.len() {
        if bytes[i..].starts_with(b"<%") {
            flush_text(source, text_start, i, out);
            let (kind, end) = if bytes.get(i + 2) == Some(&b'=') {
                (TokenKind::PrintStart, i + 3)
            } else {
                (TokenKind::OpenCode, i + 2)
            };
            out.push(Token::new(kind, Span::from_range(i..end)), TokenFlags::empty());
            return Some(end);
        }
        if bytes[i..].starts_with(b"<!--") {
            if let Some(directive) = scan_include(bytes, i) {
                flush_text(source, text_start, i, out);
                out.push(
                    Token::new(
                        TokenKind::Include {
                            path: directive.path,
                            is_virtual: directive.is_virtual,
                        },
                        Span::from_range(i..directive.end),
                    ),
                    TokenFlags::empty(),
                );
                i = directive.end;
                text_start = i;
                continue;
            }
        }
        i += 1;
    }

    flush_text(source, text_start, bytes.len(), out);
    None
}

fn flush_text(source: &str, start: usize, end: usize, out: &mut TokenList) {
    if start < end {
        out.push(
            Token::new(
                TokenKind::Text(source[start..end].to_string()),
                Span::from_range(start..end),
            ),
            TokenFlags::empty(),
        );
    }
}

struct IncludeDirective {
    path: String,
    is_virtual: bool,
    end: usize,
}

/// Match `<!-- #include file="..." -->` at `start`. Keywords are
/// case-insensitive and blanks are allowed around every part.
fn scan_include(bytes: &[u8], start: usize) -> Option<IncludeDirective> {
    let mut i = skip_blanks(bytes, start + 4);
    i = expect_word(bytes, i, b"#include")?;
    let after_keyword = i;
    i = skip_blanks(bytes, i);
    if i == after_keyword {
        return None;
    }

    let (is_virtual, after_mode) = if let Some(next) = expect_word(bytes, i, b"virtual") {
        (true, next)
    } else {
        (false, expect_word(bytes, i, b"file")?)
    };
    i = skip_blanks(bytes, after_mode);
    if bytes.get(i) != Some(&b'=') {
        return None;
    }
    i = skip_blanks(bytes, i + 1);
    if bytes.get(i) != Some(&b'"') {
        return None;
    }
    let path_start = i + 1;
    let path_len = bytes[path_start..].iter().position(|&b| b == b'"')?;
    let path = std::str::from_utf8(&bytes[path_start..path_start + path_len]).ok()?;
    i = skip_blanks(bytes, path_start + path_len + 1);
    let end = expect_word(bytes, i, b"-->")?;

    Some(IncludeDirective {
        path: path.to_string(),
        is_virtual,
        end,
    })
}

fn skip_blanks(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
        i += 1;
    }
    i
}

fn expect_word(bytes: &[u8], i: usize, word: &[u8]) -> Option<usize> {
    let end = i + word.len();
    let candidate = bytes.get(i..end)?;
    candidate.eq_ignore_ascii_case(word).then_some(end)
}
