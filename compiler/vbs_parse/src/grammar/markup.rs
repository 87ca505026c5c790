//! Literal page regions.
//!
//! A run of page text, `#include` directives and `<%= expr %>` prints
//! becomes one `Block` statement. Text and prints turn into
//! `Response.Write` calls so the evaluator never sees markup.

use vbs_ir::{
    Block, CallArg, Expr, ExprKind, Include, Literal, Name, Span, Stmt, StmtKind, TokenKind,
};

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_markup_block(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.current_span();
        let mut stmts = Vec::new();

        loop {
            let span = self.cursor.current_span();
            match self.cursor.current_kind() {
                TokenKind::Text(text) => {
                    self.cursor.advance();
                    let text = Expr::new(ExprKind::Literal(Literal::String(text.clone())), span);
                    stmts.push(response_write(text, span));
                }
                TokenKind::Include { path, is_virtual } => {
                    self.cursor.advance();
                    stmts.push(Stmt::new(
                        StmtKind::Include(Include {
                            file: path.clone(),
                            is_virtual: *is_virtual,
                            resolved: None,
                        }),
                        span,
                    ));
                }
                TokenKind::PrintStart => {
                    self.cursor.advance();
                    let value = self.parse_expr()?;
                    if !self.cursor.eat(&TokenKind::CloseCode) && !self.cursor.is_at_end() {
                        return Err(self.cursor.expected("`%>`"));
                    }
                    let span = span.merge(self.cursor.previous_span());
                    stmts.push(response_write(value, span));
                }
                _ => break,
            }
        }

        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(StmtKind::Block(Block::new(stmts)), span))
    }
}

/// `Response.Write <value>`
fn response_write(value: Expr, span: Span) -> Stmt {
    let response = Expr::new(ExprKind::Variable(Name::new("Response")), span);
    let write = Expr::new(
        ExprKind::Access {
            object: Box::new(response),
            member: Name::new("Write"),
        },
        span,
    );
    let call = Expr::new(
        ExprKind::Call {
            callee: Box::new(write),
            args: vec![CallArg::new(value, false)],
        },
        span,
    );
    Stmt::new(StmtKind::Call(call), span)
}
