//! Lexer for VBScript and classic ASP pages.
//!
//! A page alternates between literal text and code regions. Literal text is
//! scanned by hand ([`markup`]); code regions run through a logos lexer
//! ([`raw_token`]) until `%>` hands control back. Both feed one
//! [`TokenList`] that always ends with `Eof`.

mod markup;
mod raw_token;

use logos::Logos;
use raw_token::RawToken;
use vbs_ir::{Name, Span, Token, TokenFlags, TokenKind, TokenList};

/// Where lexing starts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LexMode {
    /// Literal page text first (`.asp` pages).
    Markup,
    /// Plain script source.
    Code,
}

/// Tokenize a whole source file.
pub fn lex(source: &str, mode: LexMode) -> TokenList {
    let mut out = TokenList::new();
    let mut pos = 0;
    let mut mode = mode;

    loop {
        let next = match mode {
            LexMode::Markup => markup::lex_markup(source, pos, &mut out),
            LexMode::Code => lex_code(source, pos, &mut out),
        };
        let Some(next) = next else { break };
        pos = next;
        mode = match mode {
            LexMode::Markup => LexMode::Code,
            LexMode::Code => LexMode::Markup,
        };
    }

    out.push(
        Token::new(TokenKind::Eof, Span::from_range(source.len()..source.len())),
        TokenFlags::SPACE_BEFORE,
    );
    out
}

/// Lex a code region starting at `start`. Returns the offset just past
/// `%>`, or `None` if the source ends first.
fn lex_code(source: &str, start: usize, out: &mut TokenList) -> Option<usize> {
    let mut lexer = RawToken::lexer(&source[start..]);
    let mut trivia = false;

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = Span::from_range(start + range.start..start + range.end);
        let flags = if trivia {
            TokenFlags::SPACE_BEFORE
        } else {
            TokenFlags::empty()
        };

        let kind = match result {
            Ok(RawToken::Comment | RawToken::LineContinuation) => {
                trivia = true;
                continue;
            }
            Ok(RawToken::CloseCode) => {
                out.push(Token::new(TokenKind::CloseCode, span), flags);
                return Some(start + range.end);
            }
            Ok(RawToken::Ident) => TokenKind::Ident(Name::new(lexer.slice())),
            Ok(raw) => convert(raw),
            Err(()) => TokenKind::Error,
        };
        trivia = false;
        out.push(Token::new(kind, span), flags);
    }
    None
}

fn convert(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::Number(n) => TokenKind::Number(n),
        RawToken::String(s) => TokenKind::String(s),
        RawToken::Newline => TokenKind::Newline,
        RawToken::And => TokenKind::And,
        RawToken::ByRef => TokenKind::ByRef,
        RawToken::ByVal => TokenKind::ByVal,
        RawToken::Call => TokenKind::Call,
        RawToken::Case => TokenKind::Case,
        RawToken::Class => TokenKind::Class,
        RawToken::Const => TokenKind::Const,
        RawToken::Dim => TokenKind::Dim,
        RawToken::Do => TokenKind::Do,
        RawToken::Each => TokenKind::Each,
        RawToken::Else => TokenKind::Else,
        RawToken::ElseIf => TokenKind::ElseIf,
        RawToken::Empty => TokenKind::Empty,
        RawToken::End => TokenKind::End,
        RawToken::Exit => TokenKind::Exit,
        RawToken::False => TokenKind::False,
        RawToken::For => TokenKind::For,
        RawToken::Function => TokenKind::Function,
        RawToken::If => TokenKind::If,
        RawToken::Is => TokenKind::Is,
        RawToken::Loop => TokenKind::Loop,
        RawToken::Mod => TokenKind::Mod,
        RawToken::New => TokenKind::New,
        RawToken::Next => TokenKind::Next,
        RawToken::Not => TokenKind::Not,
        RawToken::Nothing => TokenKind::Nothing,
        RawToken::Null => TokenKind::Null,
        RawToken::Option => TokenKind::Option,
        RawToken::Or => TokenKind::Or,
        RawToken::Private => TokenKind::Private,
        RawToken::Property => TokenKind::Property,
        RawToken::Public => TokenKind::Public,
        RawToken::ReDim => TokenKind::ReDim,
        RawToken::Select => TokenKind::Select,
        RawToken::Set => TokenKind::Set,
        RawToken::Sub => TokenKind::Sub,
        RawToken::Then => TokenKind::Then,
        RawToken::To => TokenKind::To,
        RawToken::True => TokenKind::True,
        RawToken::Until => TokenKind::Until,
        RawToken::Wend => TokenKind::Wend,
        RawToken::While => TokenKind::While,
        RawToken::With => TokenKind::With,
        RawToken::Xor => TokenKind::Xor,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Backslash => TokenKind::Backslash,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Eq => TokenKind::Eq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Colon => TokenKind::Colon,
        // Handled by the caller.
        RawToken::Comment
        | RawToken::LineContinuation
        | RawToken::CloseCode
        | RawToken::Ident => TokenKind::Error,
    }
}
