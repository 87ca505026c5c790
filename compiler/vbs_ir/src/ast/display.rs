//! S-expression rendering of the tree.
//!
//! Used by `vbs parse` and by tests that compare tree shapes without spans.
//! Call arguments render without their byval marker, so `s (1), 2` and
//! `call s(1, 2)` print the same.

use std::fmt;

use super::{
    AccessLevel, Block, Expr, ExprKind, ExitKind, FunctionDecl, FunctionKind, Literal,
    OnErrorKind, PropertyKind, Stmt, StmtKind,
};

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "{s:?}"),
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Boolean(b) => write!(f, "{b}"),
            Literal::Empty => f.write_str("empty"),
            Literal::Null => f.write_str("null"),
            Literal::Nothing => f.write_str("nothing"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(lit) => write!(f, "{lit}"),
            ExprKind::Variable(name) => write!(f, "{name}"),
            ExprKind::Access { object, member } => write!(f, "(. {object} {member})"),
            ExprKind::WithMember(member) => write!(f, "(. {member})"),
            ExprKind::Call { callee, args } => {
                write!(f, "(call {callee}")?;
                for arg in args {
                    write!(f, " {}", arg.value)?;
                }
                f.write_str(")")
            }
            ExprKind::New(path) => {
                f.write_str("(new ")?;
                for (i, part) in path.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    write!(f, "{part}")?;
                }
                f.write_str(")")
            }
            ExprKind::Binary { op, left, right } => {
                write!(f, "({} {left} {right})", op.as_symbol())
            }
            ExprKind::Unary { op, operand } => write!(f, "({} {operand})", op.as_symbol()),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.stmts.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

fn write_body(f: &mut fmt::Formatter<'_>, body: &Block) -> fmt::Result {
    if !body.is_empty() {
        write!(f, " {body}")?;
    }
    Ok(())
}

fn write_function(f: &mut fmt::Formatter<'_>, decl: &FunctionDecl) -> fmt::Result {
    if decl.access == AccessLevel::Private {
        f.write_str("private ")?;
    }
    let keyword = match decl.kind {
        FunctionKind::Function => "function",
        FunctionKind::Sub => "sub",
    };
    write!(f, "{keyword} {} (", decl.name)?;
    for (i, param) in decl.params.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        if param.by_ref {
            f.write_str("byref ")?;
        }
        write!(f, "{}", param.name)?;
    }
    f.write_str(")")?;
    write_body(f, &decl.body)
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::Block(block) => {
                f.write_str("(block")?;
                write_body(f, block)?;
                f.write_str(")")
            }
            StmtKind::Assignment { target, value } => write!(f, "(assign {target} {value})"),
            StmtKind::Call(call) => write!(f, "{call}"),
            StmtKind::Const { name, value } => write!(f, "(const {name} {value})"),
            StmtKind::Dim {
                name,
                dimensions,
                access,
            } => {
                f.write_str("(dim ")?;
                if *access == AccessLevel::Private {
                    f.write_str("private ")?;
                }
                write!(f, "{name}")?;
                if let Some(dims) = dimensions {
                    let dims: Vec<String> = dims.iter().map(ToString::to_string).collect();
                    write!(f, " [{}]", dims.join(" "))?;
                }
                f.write_str(")")
            }
            StmtKind::ReDim {
                name,
                dimensions,
                preserve,
            } => {
                f.write_str("(redim ")?;
                if *preserve {
                    f.write_str("preserve ")?;
                }
                write!(f, "{name}")?;
                for dim in dimensions {
                    write!(f, " {dim}")?;
                }
                f.write_str(")")
            }
            StmtKind::Function(decl) => {
                f.write_str("(")?;
                write_function(f, decl)?;
                f.write_str(")")
            }
            StmtKind::Class { name, members } => {
                write!(f, "(class {name}")?;
                for member in members {
                    write!(f, " {member}")?;
                }
                f.write_str(")")
            }
            StmtKind::Property {
                kind,
                function,
                is_default,
            } => {
                f.write_str("(property ")?;
                if *is_default {
                    f.write_str("default ")?;
                }
                let kind = match kind {
                    PropertyKind::Get => "get",
                    PropertyKind::Let => "let",
                    PropertyKind::Set => "set",
                };
                write!(f, "{kind} ")?;
                write_function(f, function)?;
                f.write_str(")")
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                write!(f, "(if {cond} (then")?;
                write_body(f, then_branch)?;
                f.write_str(")")?;
                if !else_branch.is_empty() {
                    write!(f, " (else {else_branch})")?;
                }
                f.write_str(")")
            }
            StmtKind::Loop {
                cond,
                body,
                until,
                post_condition,
            } => {
                let test = if *until { "until" } else { "while" };
                let at = if *post_condition { "post" } else { "pre" };
                write!(f, "(loop {test} {at} {cond}")?;
                write_body(f, body)?;
                f.write_str(")")
            }
            StmtKind::For {
                var,
                from,
                to,
                step,
                body,
            } => {
                write!(f, "(for {var} {from} {to} {step}")?;
                write_body(f, body)?;
                f.write_str(")")
            }
            StmtKind::ForEach {
                var,
                collection,
                body,
            } => {
                write!(f, "(foreach {var} {collection}")?;
                write_body(f, body)?;
                f.write_str(")")
            }
            StmtKind::Select { subject, cases } => {
                write!(f, "(select {subject}")?;
                for case in cases {
                    f.write_str(" (case")?;
                    match &case.conditions {
                        Some(conditions) => {
                            f.write_str(" [")?;
                            for (i, cond) in conditions.iter().enumerate() {
                                if i > 0 {
                                    f.write_str(" ")?;
                                }
                                write!(f, "{cond}")?;
                            }
                            f.write_str("]")?;
                        }
                        None => f.write_str(" else")?,
                    }
                    write_body(f, &case.body)?;
                    f.write_str(")")?;
                }
                f.write_str(")")
            }
            StmtKind::With { object, body } => {
                write!(f, "(with {object}")?;
                write_body(f, body)?;
                f.write_str(")")
            }
            StmtKind::Exit(kind) => {
                let kind = match kind {
                    ExitKind::Function => "function",
                    ExitKind::Sub => "sub",
                    ExitKind::Property => "property",
                    ExitKind::Do => "do",
                    ExitKind::For => "for",
                };
                write!(f, "(exit {kind})")
            }
            StmtKind::OnError(kind) => match kind {
                OnErrorKind::ResumeNext => f.write_str("(on-error resume-next)"),
                OnErrorKind::GotoZero => f.write_str("(on-error goto-0)"),
            },
            StmtKind::Option { on, .. } => {
                write!(f, "(option explicit {})", if *on { "on" } else { "off" })
            }
            StmtKind::Include(include) => {
                let mode = if include.is_virtual { "virtual" } else { "file" };
                write!(f, "(include {mode} {:?}", include.file)?;
                if let Some(resolved) = &include.resolved {
                    write_body(f, resolved)?;
                }
                f.write_str(")")
            }
        }
    }
}
