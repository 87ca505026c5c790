//! Token cursor for navigating the token stream.
//!
//! Provides token access, lookahead, and consumption. Positions can be
//! saved and restored, which is how the statement grammar backs out of a
//! speculative access-chain parse.

use std::mem::discriminant;

use tracing::trace;
use vbs_ir::{Name, Span, Token, TokenKind, TokenList};

use crate::ParseError;

pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `tokens`, which must end with `Eof`.
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor { tokens, pos: 0 }
    }

    /// Current position, for save/restore.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Roll back (or forward) to a position returned by [`Cursor::position`].
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(
            pos < self.tokens.len(),
            "cursor position {} out of bounds (max {})",
            pos,
            self.tokens.len()
        );
        self.pos = pos;
    }

    /// The current token. The cursor never moves past `Eof`.
    #[inline]
    pub fn current(&self) -> &'a Token {
        let tokens: &'a TokenList = self.tokens;
        &tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the token just consumed.
    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Kind at `n` tokens ahead (`0` is the current token).
    pub fn peek_kind_at(&self, n: usize) -> &'a TokenKind {
        let tokens: &'a TokenList = self.tokens;
        &tokens[(self.pos + n).min(tokens.len() - 1)].kind
    }

    /// Check the current token's variant, ignoring any payload.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        discriminant(self.current_kind()) == discriminant(kind)
    }

    #[inline]
    pub fn check_ident(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Ident(_))
    }

    /// Check for a contextual word (`explicit`, `step`, `in`, ...), which
    /// lexes as an identifier.
    #[inline]
    pub fn check_word(&self, word: &str) -> bool {
        matches!(self.current_kind(), TokenKind::Ident(name) if name.is(word))
    }

    /// True if the current token touches the previous one.
    #[inline]
    pub fn is_adjacent(&self) -> bool {
        self.tokens.flags()[self.pos].is_adjacent()
    }

    /// True if the next token touches the current one.
    #[inline]
    pub fn next_is_adjacent(&self) -> bool {
        self.tokens
            .flags()
            .get(self.pos + 1)
            .is_some_and(|flags| flags.is_adjacent())
    }

    /// Kind of the token at an absolute position.
    pub fn kind_at(&self, pos: usize) -> &'a TokenKind {
        let tokens: &'a TokenList = self.tokens;
        &tokens[pos.min(tokens.len() - 1)].kind
    }

    /// Index of the `)` matching the `(` at `open`, if any.
    pub fn matching_paren(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (offset, token) in self.tokens.as_slice()[open..].iter().enumerate() {
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(open + offset);
                    }
                }
                TokenKind::Newline | TokenKind::CloseCode | TokenKind::Eof => return None,
                _ => {}
            }
        }
        None
    }

    /// Consume the current token and return it. Stays on `Eof`.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        trace!(pos = self.pos, kind = ?token.kind, "advance");
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given variant.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a contextual word.
    pub fn eat_word(&mut self, word: &str) -> bool {
        if self.check_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given variant or fail.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.expected(&kind.describe()))
        }
    }

    /// Consume a contextual word or fail.
    pub fn expect_word(&mut self, word: &str) -> Result<Span, ParseError> {
        if self.check_word(word) {
            Ok(self.advance().span)
        } else {
            Err(self.expected(&format!("`{word}`")))
        }
    }

    pub fn expect_ident(&mut self) -> Result<Name, ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            self.advance();
            Ok(name.clone())
        } else {
            Err(self.expected("identifier"))
        }
    }

    /// Member name after `.`; keywords are allowed (`rs.eof`, `x.end`).
    pub fn expect_member_name(&mut self) -> Result<Name, ParseError> {
        let kind = self.current_kind();
        let name = match kind {
            TokenKind::Ident(name) => name.clone(),
            other => match other.keyword_str() {
                Some(text) => Name::new(text),
                None => return Err(self.expected("member name")),
            },
        };
        self.advance();
        Ok(name)
    }

    /// Skip statement separators (newlines, `:`, `<%`, `%>`).
    pub fn skip_separators(&mut self) {
        while !self.is_at_end() && self.current_kind().is_separator() {
            self.advance();
        }
    }

    #[cold]
    pub fn expected(&self, what: &str) -> ParseError {
        ParseError::expected(what, self.current_kind(), self.current_span())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vbs_lexer::{lex, LexMode};

    #[test]
    fn test_save_and_restore() {
        let tokens = lex("foo (1), 2", LexMode::Code);
        let mut cursor = Cursor::new(&tokens);
        let start = cursor.position();
        cursor.advance();
        cursor.advance();
        assert!(matches!(cursor.current_kind(), TokenKind::Number(_)));
        cursor.set_position(start);
        assert!(cursor.check_ident());
    }

    #[test]
    fn test_advance_stops_at_eof() {
        let tokens = lex("x", LexMode::Code);
        let mut cursor = Cursor::new(&tokens);
        cursor.advance();
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_matching_paren() {
        let tokens = lex("f((1) + (2), 3)", LexMode::Code);
        let cursor = Cursor::new(&tokens);
        assert_eq!(cursor.matching_paren(1), Some(11));
        assert_eq!(cursor.matching_paren(2), Some(4));
    }

    #[test]
    fn test_member_name_accepts_keywords() {
        let tokens = lex("end", LexMode::Code);
        let mut cursor = Cursor::new(&tokens);
        assert_eq!(cursor.expect_member_name(), Ok(Name::new("end")));
    }

    #[test]
    fn test_contextual_words() {
        let tokens = lex("Explicit", LexMode::Code);
        let mut cursor = Cursor::new(&tokens);
        assert!(cursor.check_word("explicit"));
        assert!(cursor.eat_word("EXPLICIT"));
        assert!(cursor.is_at_end());
    }
}
