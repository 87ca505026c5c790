//! Declarations: `dim`, `const`, `redim`, functions, properties, classes.

use std::sync::Arc;

use tracing::trace;
use vbs_ir::{
    AccessLevel, Block, FunctionDecl, FunctionKind, Literal, Param, PropertyKind, Span, Stmt,
    StmtKind, TokenKind,
};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `name[(bounds)], ...` after `dim`, `public` or `private`. Always a
    /// block, one `Dim` per declarator.
    pub(crate) fn parse_dim_declarators(
        &mut self,
        start: Span,
        access: AccessLevel,
    ) -> Result<Stmt, ParseError> {
        let mut dims = Vec::new();
        loop {
            let name_span = self.cursor.current_span();
            let name = self.cursor.expect_ident()?;
            let dimensions = if self.cursor.eat(&TokenKind::LParen) {
                let mut bounds = Vec::new();
                if !self.cursor.check(&TokenKind::RParen) {
                    bounds.push(self.parse_bound()?);
                    while self.cursor.eat(&TokenKind::Comma) {
                        bounds.push(self.parse_bound()?);
                    }
                }
                self.cursor.expect(&TokenKind::RParen)?;
                Some(bounds)
            } else {
                None
            };
            let span = name_span.merge(self.cursor.previous_span());
            dims.push(Stmt::new(
                StmtKind::Dim {
                    name,
                    dimensions,
                    access,
                },
                span,
            ));
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(StmtKind::Block(Block::new(dims)), span))
    }

    /// Array bound in a `dim`: a non-negative integer literal.
    fn parse_bound(&mut self) -> Result<u32, ParseError> {
        let span = self.cursor.current_span();
        match *self.cursor.current_kind() {
            TokenKind::Number(n) if n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) => {
                self.cursor.advance();
                Ok(n as u32)
            }
            _ => Err(ParseError::expected(
                "array bound",
                self.cursor.current_kind(),
                span,
            )),
        }
    }

    /// `public`/`private` followed by a function, sub, property, const or
    /// variable declarators.
    pub(crate) fn parse_modified_declaration(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.current_span();
        let access = if self.cursor.eat(&TokenKind::Private) {
            AccessLevel::Private
        } else {
            self.cursor.expect(&TokenKind::Public)?;
            AccessLevel::Public
        };
        let is_default = self.cursor.eat_word("default");

        match self.cursor.current_kind() {
            TokenKind::Function | TokenKind::Sub => self
                .parse_function(start, access)
                .map(|(decl, span)| Stmt::new(StmtKind::Function(decl), span)),
            TokenKind::Property if self.in_class => self.parse_property(start, access, is_default),
            TokenKind::Property => Err(ParseError::new(
                "`property` is only allowed inside a class",
                self.cursor.current_span(),
            )),
            _ if is_default => Err(self.cursor.expected("`function` or `property`")),
            TokenKind::Const => self.parse_const(start),
            _ => self.parse_dim_declarators(start, access),
        }
    }

    /// `const a = 1[, b = "x"]`. One declarator yields a bare `Const`.
    pub(crate) fn parse_const(&mut self, start: Span) -> Result<Stmt, ParseError> {
        self.cursor.expect(&TokenKind::Const)?;
        let mut consts = Vec::new();
        loop {
            let name_span = self.cursor.current_span();
            let name = self.cursor.expect_ident()?;
            self.cursor.expect(&TokenKind::Eq)?;
            let value = self.parse_const_literal()?;
            let span = name_span.merge(self.cursor.previous_span());
            consts.push(Stmt::new(StmtKind::Const { name, value }, span));
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        let span = start.merge(self.cursor.previous_span());
        if consts.len() == 1 {
            if let Some(single) = consts.pop() {
                return Ok(Stmt::new(single.kind, span));
            }
        }
        Ok(Stmt::new(StmtKind::Block(Block::new(consts)), span))
    }

    fn parse_const_literal(&mut self) -> Result<Literal, ParseError> {
        let literal = match self.cursor.current_kind() {
            TokenKind::Number(_) | TokenKind::Minus | TokenKind::Plus => {
                let (value, _) = self.parse_signed_number()?;
                return Ok(Literal::Number(value));
            }
            TokenKind::String(s) => Literal::String(s.clone()),
            TokenKind::True => Literal::Boolean(true),
            TokenKind::False => Literal::Boolean(false),
            TokenKind::Empty => Literal::Empty,
            TokenKind::Null => Literal::Null,
            TokenKind::Nothing => Literal::Nothing,
            _ => return Err(self.cursor.expected("literal")),
        };
        self.cursor.advance();
        Ok(literal)
    }

    /// `redim [preserve] a(n)[, b(n, m)]`. Always a block.
    pub(crate) fn parse_redim(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(&TokenKind::ReDim)?;
        let preserve = self.cursor.eat_word("preserve");
        let mut redims = Vec::new();
        loop {
            let name_span = self.cursor.current_span();
            let name = self.cursor.expect_ident()?;
            self.cursor.expect(&TokenKind::LParen)?;
            let mut dimensions = vec![self.parse_expr()?];
            while self.cursor.eat(&TokenKind::Comma) {
                dimensions.push(self.parse_expr()?);
            }
            self.cursor.expect(&TokenKind::RParen)?;
            let span = name_span.merge(self.cursor.previous_span());
            redims.push(Stmt::new(
                StmtKind::ReDim {
                    name,
                    dimensions,
                    preserve,
                },
                span,
            ));
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(StmtKind::Block(Block::new(redims)), span))
    }

    /// `function name(params) ... end function` or the `sub` form, with
    /// any modifiers already consumed.
    pub(crate) fn parse_function(
        &mut self,
        start: Span,
        access: AccessLevel,
    ) -> Result<(Arc<FunctionDecl>, Span), ParseError> {
        self.reject_in_procedure()?;
        let (kind, closer) = if self.cursor.eat(&TokenKind::Sub) {
            (FunctionKind::Sub, TokenKind::Sub)
        } else {
            self.cursor.expect(&TokenKind::Function)?;
            (FunctionKind::Function, TokenKind::Function)
        };
        let name = self.cursor.expect_ident()?;
        trace!(%name, "function");
        let params = self.parse_params()?;
        let body = self.parse_procedure_body()?;
        self.cursor.expect(&TokenKind::End)?;
        self.cursor.expect(&closer)?;
        let span = start.merge(self.cursor.previous_span());
        let decl = FunctionDecl {
            name,
            kind,
            params,
            body,
            access,
        };
        Ok((Arc::new(decl), span))
    }

    /// Statements up to the `end` of a function, sub or property.
    fn parse_procedure_body(&mut self) -> Result<Block, ParseError> {
        let outer_class = std::mem::replace(&mut self.in_class, false);
        let outer_procedure = std::mem::replace(&mut self.in_procedure, true);
        let body = self.parse_block_until(|c| c.check(&TokenKind::End));
        self.in_class = outer_class;
        self.in_procedure = outer_procedure;
        body
    }

    /// Procedures and classes are only declared at the top level of a
    /// script or class.
    fn reject_in_procedure(&self) -> Result<(), ParseError> {
        if !self.in_procedure {
            return Ok(());
        }
        Err(ParseError::new(
            format!(
                "`{}` cannot be declared inside a procedure",
                self.cursor.current_kind().keyword_str().unwrap_or("procedure")
            ),
            self.cursor.current_span(),
        ))
    }

    /// Optional `([byref|byval] name, ...)`; byval is the default.
    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();
        if !self.cursor.eat(&TokenKind::LParen) {
            return Ok(params);
        }
        if self.cursor.eat(&TokenKind::RParen) {
            return Ok(params);
        }
        loop {
            let by_ref = if self.cursor.eat(&TokenKind::ByRef) {
                true
            } else {
                self.cursor.eat(&TokenKind::ByVal);
                false
            };
            let name = self.cursor.expect_ident()?;
            // Array parameter marker `name()`.
            if self.cursor.check(&TokenKind::LParen)
                && matches!(self.cursor.peek_kind_at(1), TokenKind::RParen)
            {
                self.cursor.advance();
                self.cursor.advance();
            }
            params.push(Param { name, by_ref });
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RParen)?;
        Ok(params)
    }

    /// `property get|let|set name(params) ... end property`.
    pub(crate) fn parse_property(
        &mut self,
        start: Span,
        access: AccessLevel,
        is_default: bool,
    ) -> Result<Stmt, ParseError> {
        self.cursor.expect(&TokenKind::Property)?;
        let kind = if self.cursor.eat(&TokenKind::Set) {
            PropertyKind::Set
        } else if self.cursor.eat_word("get") {
            PropertyKind::Get
        } else if self.cursor.eat_word("let") {
            PropertyKind::Let
        } else {
            return Err(self.cursor.expected("`get`, `let` or `set`"));
        };
        let name = self.cursor.expect_ident()?;
        let params = self.parse_params()?;
        let body = self.parse_procedure_body()?;
        self.cursor.expect(&TokenKind::End)?;
        self.cursor.expect(&TokenKind::Property)?;
        let span = start.merge(self.cursor.previous_span());
        let function = Arc::new(FunctionDecl {
            name,
            kind: FunctionKind::Function,
            params,
            body,
            access,
        });
        Ok(Stmt::new(
            StmtKind::Property {
                kind,
                function,
                is_default,
            },
            span,
        ))
    }

    /// `class name <members> end class`.
    pub(crate) fn parse_class(&mut self) -> Result<Stmt, ParseError> {
        self.reject_in_procedure()?;
        let start = self.cursor.expect(&TokenKind::Class)?;
        let name = self.cursor.expect_ident()?;
        let outer = std::mem::replace(&mut self.in_class, true);
        let members = self.parse_class_members();
        self.in_class = outer;
        let members = members?;
        self.cursor.expect(&TokenKind::End)?;
        self.cursor.expect(&TokenKind::Class)?;
        let span = start.merge(self.cursor.previous_span());
        Ok(Stmt::new(StmtKind::Class { name, members }, span))
    }

    fn parse_class_members(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut members = Vec::new();
        loop {
            self.cursor.skip_separators();
            if self.cursor.is_at_end() || self.cursor.check(&TokenKind::End) {
                break;
            }
            let member = match self.cursor.current_kind() {
                TokenKind::Dim
                | TokenKind::Public
                | TokenKind::Private
                | TokenKind::Const
                | TokenKind::Function
                | TokenKind::Sub
                | TokenKind::Property => self.parse_statement()?,
                _ => return Err(self.cursor.expected("class member")),
            };
            members.push(member);
            self.expect_statement_end()?;
        }
        Ok(members)
    }
}
