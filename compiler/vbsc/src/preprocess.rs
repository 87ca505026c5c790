//! Include splicing.
//!
//! Every `#include` statement in a page, at any nesting depth, gets its
//! target parsed and attached in place. Execution then runs the attached
//! block at the directive's position, in the including frame.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;
use vbs_ir::{Block, Stmt, StmtKind};

use crate::include::normalize_path;
use crate::{IncludeResolver, ScriptError};

/// Resolve the includes of `block`, which was read from `path`.
pub fn preprocess(
    block: &mut Block,
    path: &Path,
    resolver: &dyn IncludeResolver,
) -> Result<(), ScriptError> {
    let mut preprocessor = Preprocessor {
        resolver,
        chain: vec![normalize_path(path)],
    };
    preprocessor.block(block)
}

struct Preprocessor<'a> {
    resolver: &'a dyn IncludeResolver,
    /// Files currently being expanded, outermost first.
    chain: Vec<PathBuf>,
}

impl Preprocessor<'_> {
    fn block(&mut self, block: &mut Block) -> Result<(), ScriptError> {
        for stmt in &mut block.stmts {
            self.stmt(stmt)?;
        }
        Ok(())
    }

    fn stmt(&mut self, stmt: &mut Stmt) -> Result<(), ScriptError> {
        match &mut stmt.kind {
            StmtKind::Include(include) => {
                if include.resolved.is_some() {
                    return Ok(());
                }
                let from = self.chain.last().cloned().unwrap_or_default();
                let target = normalize_path(&self.resolver.resolve(include, &from));
                if self.chain.contains(&target) {
                    let mut chain = self.chain.clone();
                    chain.push(target);
                    return Err(ScriptError::IncludeCycle { chain });
                }
                let mut included = self.resolver.load(&target)?;
                debug!(from = %from.display(), target = %target.display(), "splice include");
                self.chain.push(target);
                let result = self.block(&mut included);
                self.chain.pop();
                result?;
                include.resolved = Some(included);
            }
            StmtKind::Block(block) => self.block(block)?,
            StmtKind::If {
                then_branch,
                else_branch,
                ..
            } => {
                self.block(then_branch)?;
                self.block(else_branch)?;
            }
            StmtKind::Loop { body, .. }
            | StmtKind::For { body, .. }
            | StmtKind::ForEach { body, .. }
            | StmtKind::With { body, .. } => self.block(body)?,
            StmtKind::Select { cases, .. } => {
                for case in cases {
                    self.block(&mut case.body)?;
                }
            }
            StmtKind::Function(decl) | StmtKind::Property { function: decl, .. } => {
                self.block(&mut Arc::make_mut(decl).body)?;
            }
            StmtKind::Class { members, .. } => {
                for member in members {
                    self.stmt(member)?;
                }
            }
            StmtKind::Assignment { .. }
            | StmtKind::Call(_)
            | StmtKind::Const { .. }
            | StmtKind::Dim { .. }
            | StmtKind::ReDim { .. }
            | StmtKind::Exit(_)
            | StmtKind::OnError(_)
            | StmtKind::Option { .. } => {}
        }
        Ok(())
    }
}
