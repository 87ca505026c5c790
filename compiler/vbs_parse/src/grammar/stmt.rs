//! Statement lists, dispatch, and the call/assignment forms.
//!
//! A statement that starts with a name is ambiguous until its end: it can
//! be an assignment (`dict(1) = 2`), a sub call with bare arguments
//! (`foo 1, 2`), or a sub call whose first argument happens to be
//! parenthesized (`foo (1), 2`). The access chain is parsed greedily and
//! then reinterpreted by looking at what follows it.

use vbs_ir::{Block, CallArg, Expr, ExprKind, Stmt, StmtKind, TokenKind};

use crate::{Cursor, ParseError, Parser};

impl Parser<'_> {
    /// Parse statements until `is_end` matches the current token (the
    /// terminator is not consumed) or input ends.
    pub(crate) fn parse_block_until(
        &mut self,
        is_end: impl Fn(&Cursor<'_>) -> bool,
    ) -> Result<Block, ParseError> {
        let mut stmts = Vec::new();
        loop {
            self.cursor.skip_separators();
            if self.cursor.is_at_end() || is_end(&self.cursor) {
                break;
            }
            stmts.push(self.parse_statement()?);
            self.expect_statement_end()?;
        }
        Ok(Block::new(stmts))
    }

    /// A statement must be followed by a separator or a literal region.
    pub(crate) fn expect_statement_end(&mut self) -> Result<(), ParseError> {
        let kind = self.cursor.current_kind();
        if kind.is_separator() || kind.is_markup() {
            Ok(())
        } else {
            Err(self.cursor.expected("end of statement"))
        }
    }

    pub(crate) fn at_statement_end(&self) -> bool {
        let kind = self.cursor.current_kind();
        kind.is_separator() || kind.is_markup()
    }

    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Text(_) | TokenKind::Include { .. } | TokenKind::PrintStart => {
                self.parse_markup_block()
            }
            TokenKind::Dim => {
                let start = self.cursor.advance().span;
                self.parse_dim_declarators(start, vbs_ir::AccessLevel::Public)
            }
            TokenKind::Public | TokenKind::Private => self.parse_modified_declaration(),
            TokenKind::Const => {
                let start = self.cursor.current_span();
                self.parse_const(start)
            }
            TokenKind::ReDim => self.parse_redim(),
            TokenKind::Function | TokenKind::Sub => {
                let start = self.cursor.current_span();
                self.parse_function(start, vbs_ir::AccessLevel::Public)
                    .map(|(decl, span)| Stmt::new(StmtKind::Function(decl), span))
            }
            TokenKind::Property => {
                if self.in_class {
                    let start = self.cursor.current_span();
                    self.parse_property(start, vbs_ir::AccessLevel::Public, false)
                } else {
                    Err(ParseError::new(
                        "`property` is only allowed inside a class",
                        self.cursor.current_span(),
                    ))
                }
            }
            TokenKind::Class => self.parse_class(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Do => self.parse_do(),
            TokenKind::For => self.parse_for(),
            TokenKind::Select => self.parse_select(),
            TokenKind::With => self.parse_with(),
            TokenKind::Exit => self.parse_exit(),
            TokenKind::Option => self.parse_option(),
            TokenKind::Call => self.parse_call_statement(),
            TokenKind::Set => {
                let start = self.cursor.advance().span;
                self.parse_assignment_only(start)
            }
            TokenKind::Ident(name)
                if name.is("on") && matches!(self.cursor.peek_kind_at(1), TokenKind::Ident(next) if next.is("error")) =>
            {
                self.parse_on_error()
            }
            TokenKind::Ident(name)
                if name.is("let") && matches!(self.cursor.peek_kind_at(1), TokenKind::Ident(_)) =>
            {
                let start = self.cursor.advance().span;
                self.parse_assignment_only(start)
            }
            TokenKind::Ident(_) | TokenKind::Dot => self.parse_simple_statement(),
            _ => Err(self.cursor.expected("statement")),
        }
    }

    /// Assignment or sub call starting with a name.
    fn parse_simple_statement(&mut self) -> Result<Stmt, ParseError> {
        let head = self.parse_chain_head()?;
        let (chain, last_application) = self.parse_chain_tracked(head)?;

        if self.cursor.eat(&TokenKind::Eq) {
            let value = self.parse_expr()?;
            let span = chain.span.merge(value.span);
            return Ok(Stmt::new(
                StmtKind::Assignment {
                    target: chain,
                    value,
                },
                span,
            ));
        }

        // `else` ends the then-part of a single-line `if`.
        if self.at_statement_end() || self.cursor.check(&TokenKind::Else) {
            return Ok(sub_call(chain, last_application.is_some()));
        }

        // More tokens follow, so this is a sub call with bare arguments. A
        // trailing application is really the parenthesized first argument.
        let callee = match (chain.kind, last_application) {
            (ExprKind::Call { callee, .. }, Some(open)) => {
                self.cursor.set_position(open);
                *callee
            }
            (kind, _) => Expr::new(kind, chain.span),
        };
        let mut args = vec![self.parse_call_arg()?];
        while self.cursor.eat(&TokenKind::Comma) {
            args.push(self.parse_call_arg()?);
        }
        let span = callee.span.merge(self.cursor.previous_span());
        let call = Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
            span,
        );
        Ok(Stmt::new(StmtKind::Call(call), span))
    }

    /// `set x = ...` / `let x = ...`: the keyword is already consumed.
    fn parse_assignment_only(&mut self, start: vbs_ir::Span) -> Result<Stmt, ParseError> {
        let head = self.parse_chain_head()?;
        let target = self.parse_chain(head)?;
        self.cursor.expect(&TokenKind::Eq)?;
        let value = self.parse_expr()?;
        let span = start.merge(value.span);
        Ok(Stmt::new(StmtKind::Assignment { target, value }, span))
    }

    /// `call foo(1, 2)` / `call obj.method`.
    fn parse_call_statement(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.advance().span;
        let head = self.parse_chain_head()?;
        let chain = self.parse_chain(head)?;
        let span = start.merge(chain.span);
        let call = match chain.kind {
            ExprKind::Call { .. } => Expr::new(chain.kind, span),
            _ => Expr::new(
                ExprKind::Call {
                    callee: Box::new(chain),
                    args: Vec::new(),
                },
                span,
            ),
        };
        Ok(Stmt::new(StmtKind::Call(call), span))
    }
}

/// Wrap a complete access chain as a call statement. `foo(x)` on its own
/// passes `x` byval, as the parentheses belong to the argument.
fn sub_call(chain: Expr, ends_in_application: bool) -> Stmt {
    let span = chain.span;
    let call = match chain.kind {
        ExprKind::Call { callee, mut args } => {
            if ends_in_application && args.len() == 1 {
                args[0].parenthesized = true;
            }
            Expr::new(ExprKind::Call { callee, args }, span)
        }
        kind => Expr::new(
            ExprKind::Call {
                callee: Box::new(Expr::new(kind, span)),
                args: Vec::<CallArg>::new(),
            },
            span,
        ),
    };
    Stmt::new(StmtKind::Call(call), span)
}
