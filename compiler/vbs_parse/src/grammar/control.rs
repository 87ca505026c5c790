//! Control structures.

use vbs_ir::{
    Block, Expr, ExprKind, ExitKind, Literal, OnErrorKind, OptionKind, SelectCase, Span, Stmt,
    StmtKind, TokenKind,
};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `if c then a : b [else c : d]` on one line, or the block form ending
    /// in `end if`.
    pub(crate) fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(&TokenKind::If)?;
        let cond = self.parse_expr()?;
        self.cursor.expect(&TokenKind::Then)?;

        if !self.at_statement_end() {
            let then_branch = self.parse_inline_statements()?;
            let else_branch = if self.cursor.eat(&TokenKind::Else) {
                self.parse_inline_statements()?
            } else {
                Block::default()
            };
            let span = start.merge(self.cursor.previous_span());
            return Ok(Stmt::new(
                StmtKind::If {
                    cond,
                    then_branch,
                    else_branch,
                },
                span,
            ));
        }

        let (then_branch, else_branch) = self.parse_if_branches()?;
        self.cursor.expect(&TokenKind::End)?;
        self.cursor.expect(&TokenKind::If)?;
        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            },
            span,
        ))
    }

    /// `:`-separated statements up to the end of the line or an `else`.
    fn parse_inline_statements(&mut self) -> Result<Block, ParseError> {
        let mut stmts = vec![self.parse_statement()?];
        while self.cursor.eat(&TokenKind::Colon) {
            let kind = self.cursor.current_kind();
            if kind.is_separator() || kind.is_markup() || self.cursor.check(&TokenKind::Else) {
                break;
            }
            stmts.push(self.parse_statement()?);
        }
        Ok(Block::new(stmts))
    }

    /// Then-block plus any `elseif`/`else` tail, stopping at `end`. An
    /// `elseif` becomes a nested `If` as the sole else statement.
    fn parse_if_branches(&mut self) -> Result<(Block, Block), ParseError> {
        let then_branch = self.parse_block_until(|c| {
            c.check(&TokenKind::ElseIf) || c.check(&TokenKind::Else) || c.check(&TokenKind::End)
        })?;

        let else_branch = match self.cursor.current_kind() {
            TokenKind::ElseIf => {
                let start = self.cursor.advance().span;
                let cond = self.parse_expr()?;
                self.cursor.expect(&TokenKind::Then)?;
                let (nested_then, nested_else) = self.parse_if_branches()?;
                let span = start.merge(self.cursor.previous_span());
                Block::new(vec![Stmt::new(
                    StmtKind::If {
                        cond,
                        then_branch: nested_then,
                        else_branch: nested_else,
                    },
                    span,
                )])
            }
            TokenKind::Else => {
                self.cursor.advance();
                self.parse_block_until(|c| c.check(&TokenKind::End))?
            }
            _ => Block::default(),
        };
        Ok((then_branch, else_branch))
    }

    /// `while c ... wend`
    pub(crate) fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(&TokenKind::While)?;
        let cond = self.parse_expr()?;
        let body = self.parse_block_until(|c| c.check(&TokenKind::Wend))?;
        self.cursor.expect(&TokenKind::Wend)?;
        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(
            StmtKind::Loop {
                cond,
                body,
                until: false,
                post_condition: false,
            },
            span,
        ))
    }

    /// `do [while|until c] ... loop [while|until c]`
    pub(crate) fn parse_do(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(&TokenKind::Do)?;

        let pre = self.parse_loop_condition()?;
        let body = self.parse_block_until(|c| c.check(&TokenKind::Loop))?;
        self.cursor.expect(&TokenKind::Loop)?;
        let post = if pre.is_none() {
            self.parse_loop_condition()?
        } else {
            None
        };

        let span = start.merge(self.cursor.previous_span());
        let (cond, until, post_condition) = match (pre, post) {
            (Some((cond, until)), _) => (cond, until, false),
            (None, Some((cond, until))) => (cond, until, true),
            (None, None) => (
                Expr::new(ExprKind::Literal(Literal::Boolean(true)), start),
                false,
                false,
            ),
        };
        Ok(Stmt::new(
            StmtKind::Loop {
                cond,
                body,
                until,
                post_condition,
            },
            span,
        ))
    }

    /// Optional `while c` / `until c`; the flag is true for `until`.
    fn parse_loop_condition(&mut self) -> Result<Option<(Expr, bool)>, ParseError> {
        let until = if self.cursor.eat(&TokenKind::While) {
            false
        } else if self.cursor.eat(&TokenKind::Until) {
            true
        } else {
            return Ok(None);
        };
        Ok(Some((self.parse_expr()?, until)))
    }

    /// `for v = a to b [step s] ... next` or `for each v in e ... next`.
    pub(crate) fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(&TokenKind::For)?;

        if self.cursor.eat(&TokenKind::Each) {
            let var = self.cursor.expect_ident()?;
            self.cursor.expect_word("in")?;
            let collection = self.parse_expr()?;
            let body = self.parse_next_body()?;
            let span = start.merge(self.cursor.previous_span());
            return Ok(Stmt::new(
                StmtKind::ForEach {
                    var,
                    collection,
                    body,
                },
                span,
            ));
        }

        let var = self.cursor.expect_ident()?;
        self.cursor.expect(&TokenKind::Eq)?;
        let from = self.parse_expr()?;
        self.cursor.expect(&TokenKind::To)?;
        let to = self.parse_expr()?;
        let step = if self.cursor.eat_word("step") {
            self.parse_expr()?
        } else {
            Expr::new(ExprKind::Literal(Literal::Number(1.0)), to.span)
        };
        let body = self.parse_next_body()?;
        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(
            StmtKind::For {
                var,
                from,
                to,
                step,
                body,
            },
            span,
        ))
    }

    /// Loop body through `next [var]`.
    fn parse_next_body(&mut self) -> Result<Block, ParseError> {
        let body = self.parse_block_until(|c| c.check(&TokenKind::Next))?;
        self.cursor.expect(&TokenKind::Next)?;
        if self.cursor.check_ident() {
            self.cursor.advance();
        }
        Ok(body)
    }

    /// `select case e (case ... | case else ...)* end select`
    pub(crate) fn parse_select(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(&TokenKind::Select)?;
        self.cursor.expect(&TokenKind::Case)?;
        let subject = self.parse_expr()?;

        let mut cases = Vec::new();
        loop {
            self.cursor.skip_separators();
            if self.cursor.check(&TokenKind::End) || self.cursor.is_at_end() {
                break;
            }
            self.cursor.expect(&TokenKind::Case)?;
            let conditions = if self.cursor.eat(&TokenKind::Else) {
                None
            } else {
                let mut conditions = vec![self.parse_expr()?];
                while self.cursor.eat(&TokenKind::Comma) {
                    conditions.push(self.parse_expr()?);
                }
                Some(conditions)
            };
            let body = self
                .parse_block_until(|c| c.check(&TokenKind::Case) || c.check(&TokenKind::End))?;
            cases.push(SelectCase { conditions, body });
        }

        self.cursor.expect(&TokenKind::End)?;
        self.cursor.expect(&TokenKind::Select)?;
        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(StmtKind::Select { subject, cases }, span))
    }

    /// `with e ... end with`
    pub(crate) fn parse_with(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(&TokenKind::With)?;
        let object = self.parse_expr()?;
        let body = self.parse_block_until(|c| c.check(&TokenKind::End))?;
        self.cursor.expect(&TokenKind::End)?;
        self.cursor.expect(&TokenKind::With)?;
        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(StmtKind::With { object, body }, span))
    }

    /// `exit function|sub|property|do|for`
    pub(crate) fn parse_exit(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(&TokenKind::Exit)?;
        let kind = match self.cursor.current_kind() {
            TokenKind::Function => ExitKind::Function,
            TokenKind::Sub => ExitKind::Sub,
            TokenKind::Property => ExitKind::Property,
            TokenKind::Do => ExitKind::Do,
            TokenKind::For => ExitKind::For,
            _ => return Err(self.cursor.expected("`function`, `sub`, `property`, `do` or `for`")),
        };
        let end = self.cursor.advance().span;
        Ok(Stmt::new(StmtKind::Exit(kind), start.merge(end)))
    }

    /// `option explicit [on|off]`
    pub(crate) fn parse_option(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(&TokenKind::Option)?;
        self.cursor.expect_word("explicit")?;
        let on = if self.cursor.eat_word("off") {
            false
        } else {
            self.cursor.eat_word("on");
            true
        };
        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(
            StmtKind::Option {
                kind: OptionKind::Explicit,
                on,
            },
            span,
        ))
    }

    /// `on error resume next` / `on error goto 0`
    pub(crate) fn parse_on_error(&mut self) -> Result<Stmt, ParseError> {
        let start: Span = self.cursor.expect_word("on")?;
        self.cursor.expect_word("error")?;
        let kind = if self.cursor.eat_word("resume") {
            self.cursor.expect(&TokenKind::Next)?;
            OnErrorKind::ResumeNext
        } else {
            self.cursor.expect_word("goto")?;
            match self.cursor.current_kind() {
                TokenKind::Number(n) if *n == 0.0 => {
                    self.cursor.advance();
                }
                _ => return Err(self.cursor.expected("`0`")),
            }
            OnErrorKind::GotoZero
        };
        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(StmtKind::OnError(kind), span))
    }
}
