//! Token types produced by the lexer.

use std::fmt;

use bitflags::bitflags;

use super::{Name, Span};

/// A token with its source span.
#[derive(Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Token kinds.
///
/// Literal text regions of an ASP page are tokens too (`Text`, `Include`,
/// and the `<%`, `<%=`, `%>` delimiters), so the parser sees one stream for
/// the whole page.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// Numeric literal, decimal or `&H` hex. Sign is folded by the parser.
    Number(f64),
    /// String literal with `""` already unescaped.
    String(String),
    /// Identifier, already case-folded.
    Ident(Name),

    /// Literal page text outside `<% %>`.
    Text(String),
    /// `<!-- #include file="..." -->` or `virtual="..."`.
    Include { path: String, is_virtual: bool },
    /// `<%`
    OpenCode,
    /// `<%=`
    PrintStart,
    /// `%>`
    CloseCode,

    // Keywords
    And,
    ByRef,
    ByVal,
    Call,
    Case,
    Class,
    Const,
    Dim,
    Do,
    Each,
    Else,
    ElseIf,
    Empty,
    End,
    Exit,
    False,
    For,
    Function,
    If,
    Is,
    Loop,
    Mod,
    New,
    Next,
    Not,
    Nothing,
    Null,
    Option,
    Or,
    Private,
    Property,
    Public,
    ReDim,
    Select,
    Set,
    Sub,
    Then,
    To,
    True,
    Until,
    Wend,
    While,
    With,
    Xor,

    // Operators and punctuation
    Amp,
    Plus,
    Minus,
    Star,
    Slash,
    Backslash,
    Caret,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    LParen,
    RParen,
    Comma,
    Dot,
    Colon,

    Newline,
    /// Unrecognised input; the parser reports it.
    Error,
    Eof,
}

impl TokenKind {
    /// Source spelling of a keyword token, used where keywords are valid
    /// member names (`rs.end`, `obj.class`).
    pub fn keyword_str(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::And => "and",
            TokenKind::ByRef => "byref",
            TokenKind::ByVal => "byval",
            TokenKind::Call => "call",
            TokenKind::Case => "case",
            TokenKind::Class => "class",
            TokenKind::Const => "const",
            TokenKind::Dim => "dim",
            TokenKind::Do => "do",
            TokenKind::Each => "each",
            TokenKind::Else => "else",
            TokenKind::ElseIf => "elseif",
            TokenKind::Empty => "empty",
            TokenKind::End => "end",
            TokenKind::Exit => "exit",
            TokenKind::False => "false",
            TokenKind::For => "for",
            TokenKind::Function => "function",
            TokenKind::If => "if",
            TokenKind::Is => "is",
            TokenKind::Loop => "loop",
            TokenKind::Mod => "mod",
            TokenKind::New => "new",
            TokenKind::Next => "next",
            TokenKind::Not => "not",
            TokenKind::Nothing => "nothing",
            TokenKind::Null => "null",
            TokenKind::Option => "option",
            TokenKind::Or => "or",
            TokenKind::Private => "private",
            TokenKind::Property => "property",
            TokenKind::Public => "public",
            TokenKind::ReDim => "redim",
            TokenKind::Select => "select",
            TokenKind::Set => "set",
            TokenKind::Sub => "sub",
            TokenKind::Then => "then",
            TokenKind::To => "to",
            TokenKind::True => "true",
            TokenKind::Until => "until",
            TokenKind::Wend => "wend",
            TokenKind::While => "while",
            TokenKind::With => "with",
            TokenKind::Xor => "xor",
            _ => return None,
        };
        Some(text)
    }

    /// True for tokens that end a statement: newline, `:`, code delimiters
    /// and end of input.
    #[inline]
    pub fn is_separator(&self) -> bool {
        matches!(
            self,
            TokenKind::Newline
                | TokenKind::Colon
                | TokenKind::OpenCode
                | TokenKind::CloseCode
                | TokenKind::Eof
        )
    }

    /// True for tokens that start a literal page region.
    #[inline]
    pub fn is_markup(&self) -> bool {
        matches!(
            self,
            TokenKind::Text(_) | TokenKind::Include { .. } | TokenKind::PrintStart
        )
    }

    /// Short human-readable description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Number(n) => format!("number `{n}`"),
            TokenKind::String(_) => "string literal".to_string(),
            TokenKind::Ident(name) => format!("identifier `{name}`"),
            TokenKind::Text(_) => "page text".to_string(),
            TokenKind::Include { .. } => "#include directive".to_string(),
            TokenKind::OpenCode => "`<%`".to_string(),
            TokenKind::PrintStart => "`<%=`".to_string(),
            TokenKind::CloseCode => "`%>`".to_string(),
            TokenKind::Amp => "`&`".to_string(),
            TokenKind::Plus => "`+`".to_string(),
            TokenKind::Minus => "`-`".to_string(),
            TokenKind::Star => "`*`".to_string(),
            TokenKind::Slash => "`/`".to_string(),
            TokenKind::Backslash => "`\\`".to_string(),
            TokenKind::Caret => "`^`".to_string(),
            TokenKind::Eq => "`=`".to_string(),
            TokenKind::NotEq => "`<>`".to_string(),
            TokenKind::Lt => "`<`".to_string(),
            TokenKind::LtEq => "`<=`".to_string(),
            TokenKind::Gt => "`>`".to_string(),
            TokenKind::GtEq => "`>=`".to_string(),
            TokenKind::LParen => "`(`".to_string(),
            TokenKind::RParen => "`)`".to_string(),
            TokenKind::Comma => "`,`".to_string(),
            TokenKind::Dot => "`.`".to_string(),
            TokenKind::Colon => "`:`".to_string(),
            TokenKind::Newline => "end of line".to_string(),
            TokenKind::Error => "invalid token".to_string(),
            TokenKind::Eof => "end of file".to_string(),
            keyword => match keyword.keyword_str() {
                Some(text) => format!("keyword `{text}`"),
                None => format!("{keyword:?}"),
            },
        }
    }
}

bitflags! {
    /// Whitespace context preceding a token.
    ///
    /// The parser uses adjacency to tell an empty call `foo()` from
    /// `foo ( )`, and to keep `foo (1), 2` from reading as an application.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TokenFlags: u8 {
        /// Blanks, a comment or a line continuation preceded this token.
        const SPACE_BEFORE = 1 << 0;
        /// Token starts exactly where the previous token ended.
        const ADJACENT = 1 << 1;
    }
}

impl TokenFlags {
    #[inline]
    pub fn is_adjacent(self) -> bool {
        self.contains(TokenFlags::ADJACENT)
    }
}

/// Token stream with per-token flags. Always ends with `Eof`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenList {
    tokens: Vec<Token>,
    flags: Vec<TokenFlags>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList::default()
    }

    /// Append a token, deriving `ADJACENT` from the previous token's end.
    pub fn push(&mut self, token: Token, mut flags: TokenFlags) {
        if let Some(prev) = self.tokens.last() {
            if prev.span.end == token.span.start && !flags.contains(TokenFlags::SPACE_BEFORE) {
                flags |= TokenFlags::ADJACENT;
            }
        }
        self.tokens.push(token);
        self.flags.push(flags);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn flags(&self) -> &[TokenFlags] {
        &self.flags
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl std::ops::Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}
