//! Expression parsing.
//!
//! One function per precedence tier, lowest binding first:
//!
//! | Tier | Operators |
//! |------|-----------|
//! | or | `or` |
//! | and | `and` |
//! | xor | `xor` |
//! | not | unary `not` |
//! | comparison | `= <> < <= > >=` |
//! | concat | `&` |
//! | mod | `mod` |
//! | additive | `+ -` |
//! | multiplicative | `* / \` |
//! | sign | unary `-` / `+` on a non-literal |
//! | power | `^` |
//! | is | `is` |
//!
//! Every binary tier is left-associative.

use vbs_ir::{BinaryOp, CallArg, Expr, ExprKind, Literal, TokenKind, UnaryOp};
use vbs_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse an expression.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_or())
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.cursor.eat(&TokenKind::Or) {
            let right = self.parse_and()?;
            left = binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_xor()?;
        while self.cursor.eat(&TokenKind::And) {
            let right = self.parse_xor()?;
            left = binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_xor(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_not()?;
        while self.cursor.eat(&TokenKind::Xor) {
            let right = self.parse_not()?;
            left = binary(BinaryOp::Xor, left, right);
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        if self.cursor.check(&TokenKind::Not) {
            let start = self.cursor.advance().span;
            let operand = ensure_sufficient_stack(|| self.parse_not())?;
            let span = start.merge(operand.span);
            return Ok(Expr::new(
                ExprKind::Unary {
                    op: UnaryOp::Not,
                    operand: Box::new(operand),
                },
                span,
            ));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_concat()?;
        while let Some(op) = self.match_comparison_op() {
            self.cursor.advance();
            // `a = not b` negates the rest of the comparison.
            let right = if self.cursor.check(&TokenKind::Not) {
                self.parse_not()?
            } else {
                self.parse_concat()?
            };
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_concat(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_mod()?;
        while self.cursor.eat(&TokenKind::Amp) {
            let right = self.parse_mod()?;
            left = binary(BinaryOp::Concat, left, right);
        }
        Ok(left)
    }

    fn parse_mod(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;
        while self.cursor.eat(&TokenKind::Mod) {
            let right = self.parse_additive()?;
            left = binary(BinaryOp::Mod, left, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.cursor.advance();
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_sign()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Backslash => BinaryOp::IntDiv,
                _ => break,
            };
            self.cursor.advance();
            let right = self.parse_sign()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    /// Sign on a non-literal operand. A sign directly before a number is
    /// left for [`Parser::parse_primary`], which folds it into the literal.
    fn parse_sign(&mut self) -> Result<Expr, ParseError> {
        self.parse_signed(Self::parse_power)
    }

    /// Right operand of `^` and `is`: a primary, optionally signed.
    fn parse_signed_primary(&mut self) -> Result<Expr, ParseError> {
        self.parse_signed(Self::parse_primary)
    }

    fn parse_signed(
        &mut self,
        parse_operand: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let negate = match self.cursor.current_kind() {
            TokenKind::Minus => true,
            TokenKind::Plus => false,
            _ => return parse_operand(self),
        };
        if matches!(self.cursor.peek_kind_at(1), TokenKind::Number(_)) {
            return parse_operand(self);
        }
        let start = self.cursor.advance().span;
        let operand = ensure_sufficient_stack(|| self.parse_signed(parse_operand))?;
        if !negate {
            return Ok(operand);
        }
        let span = start.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_is()?;
        while self.cursor.eat(&TokenKind::Caret) {
            let right = self.parse_is_from(Self::parse_signed_primary)?;
            left = binary(BinaryOp::Pow, left, right);
        }
        Ok(left)
    }

    fn parse_is(&mut self) -> Result<Expr, ParseError> {
        self.parse_is_from(Self::parse_primary)
    }

    fn parse_is_from(
        &mut self,
        first: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut left = first(self)?;
        while self.cursor.eat(&TokenKind::Is) {
            let right = self.parse_signed_primary()?;
            left = binary(BinaryOp::Is, left, right);
        }
        Ok(left)
    }

    fn match_comparison_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind() {
            TokenKind::Eq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::NotEq),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::LtEq => Some(BinaryOp::LtEq),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::GtEq => Some(BinaryOp::GtEq),
            _ => None,
        }
    }

    /// Literals, `new`, parenthesized expressions and access chains.
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let span = self.cursor.current_span();
        let literal = match self.cursor.current_kind() {
            TokenKind::Number(n) => Some(Literal::Number(*n)),
            TokenKind::String(s) => Some(Literal::String(s.clone())),
            TokenKind::True => Some(Literal::Boolean(true)),
            TokenKind::False => Some(Literal::Boolean(false)),
            TokenKind::Empty => Some(Literal::Empty),
            TokenKind::Null => Some(Literal::Null),
            TokenKind::Nothing => Some(Literal::Nothing),
            _ => None,
        };
        if let Some(literal) = literal {
            self.cursor.advance();
            return Ok(Expr::new(ExprKind::Literal(literal), span));
        }

        match self.cursor.current_kind() {
            TokenKind::Minus | TokenKind::Plus => {
                let (value, span) = self.parse_signed_number()?;
                Ok(Expr::new(ExprKind::Literal(Literal::Number(value)), span))
            }
            TokenKind::New => {
                self.cursor.advance();
                let mut path = vec![self.cursor.expect_ident()?];
                while self.cursor.eat(&TokenKind::Dot) {
                    path.push(self.cursor.expect_member_name()?);
                }
                let span = span.merge(self.cursor.previous_span());
                Ok(Expr::new(ExprKind::New(path), span))
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                self.cursor.expect(&TokenKind::RParen)?;
                let inner = Expr::new(inner.kind, span.merge(self.cursor.previous_span()));
                self.parse_chain(inner)
            }
            TokenKind::Ident(_) | TokenKind::Dot => {
                let head = self.parse_chain_head()?;
                self.parse_chain(head)
            }
            _ => Err(self.cursor.expected("expression")),
        }
    }

    /// `-14.87`, `+14.87`: a sign token directly followed by a number.
    pub(crate) fn parse_signed_number(&mut self) -> Result<(f64, vbs_ir::Span), ParseError> {
        let start = self.cursor.current_span();
        let negate = match self.cursor.current_kind() {
            TokenKind::Minus => true,
            TokenKind::Plus => false,
            TokenKind::Number(n) => {
                let n = *n;
                self.cursor.advance();
                return Ok((n, start));
            }
            _ => return Err(self.cursor.expected("number")),
        };
        self.cursor.advance();
        let TokenKind::Number(n) = *self.cursor.current_kind() else {
            return Err(self.cursor.expected("number"));
        };
        let end = self.cursor.advance().span;
        Ok((if negate { -n } else { n }, start.merge(end)))
    }

    /// Identifier or `.member` (inside `with`) starting an access chain.
    pub(crate) fn parse_chain_head(&mut self) -> Result<Expr, ParseError> {
        let span = self.cursor.current_span();
        match self.cursor.current_kind() {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.cursor.advance();
                Ok(Expr::new(ExprKind::Variable(name), span))
            }
            TokenKind::Dot => {
                self.cursor.advance();
                let member = self.cursor.expect_member_name()?;
                let span = span.merge(self.cursor.previous_span());
                Ok(Expr::new(ExprKind::WithMember(member), span))
            }
            _ => Err(self.cursor.expected("identifier")),
        }
    }

    pub(crate) fn parse_chain(&mut self, head: Expr) -> Result<Expr, ParseError> {
        self.parse_chain_tracked(head).map(|(expr, _)| expr)
    }

    /// Extend `head` with `.member` and `(args)` links.
    ///
    /// Also returns the position of the `(` when the final link is an
    /// application, so a sub-call statement can re-read it as a
    /// parenthesized first argument.
    pub(crate) fn parse_chain_tracked(
        &mut self,
        head: Expr,
    ) -> Result<(Expr, Option<usize>), ParseError> {
        let mut expr = head;
        let mut last_application = None;
        loop {
            match self.cursor.current_kind() {
                // `foo .bar` inside `with` passes `.bar` as an argument.
                TokenKind::Dot if self.cursor.is_adjacent() => {
                    self.cursor.advance();
                    let member = self.cursor.expect_member_name()?;
                    let span = expr.span.merge(self.cursor.previous_span());
                    expr = Expr::new(
                        ExprKind::Access {
                            object: Box::new(expr),
                            member,
                        },
                        span,
                    );
                    last_application = None;
                }
                TokenKind::LParen => {
                    let open = self.cursor.position();
                    self.cursor.advance();
                    let args = if self.cursor.check(&TokenKind::RParen) && self.cursor.is_adjacent()
                    {
                        Vec::new()
                    } else {
                        self.parse_call_args()?
                    };
                    self.cursor.expect(&TokenKind::RParen)?;
                    let span = expr.span.merge(self.cursor.previous_span());
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    );
                    last_application = Some(open);
                }
                _ => break,
            }
        }
        Ok((expr, last_application))
    }

    /// Comma-separated arguments inside an application.
    fn parse_call_args(&mut self) -> Result<Vec<CallArg>, ParseError> {
        let mut args = vec![self.parse_call_arg()?];
        while self.cursor.eat(&TokenKind::Comma) {
            args.push(self.parse_call_arg()?);
        }
        Ok(args)
    }

    /// One argument, noting whether it is exactly one parenthesized
    /// expression.
    pub(crate) fn parse_call_arg(&mut self) -> Result<CallArg, ParseError> {
        let start = self.cursor.position();
        let value = self.parse_expr()?;
        let parenthesized = matches!(self.cursor.kind_at(start), TokenKind::LParen)
            && self.cursor.matching_paren(start) == Some(self.cursor.position() - 1);
        Ok(CallArg::new(value, parenthesized))
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}
