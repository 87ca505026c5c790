//! Driver errors.

use std::fmt::Write as _;
use std::path::PathBuf;

use thiserror::Error;
use vbs_eval::EvalError;
use vbs_ir::Span;

/// Anything that can stop a page from loading or rendering.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("{}:{line}:{column}: {message}", file.display())]
    Syntax {
        file: PathBuf,
        line: u32,
        column: u32,
        message: String,
        span: Span,
    },

    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("include cycle: {}", describe_chain(chain))]
    IncludeCycle { chain: Vec<PathBuf> },

    #[error("runtime error: {0}")]
    Runtime(#[from] EvalError),
}

fn describe_chain(chain: &[PathBuf]) -> String {
    let mut text = String::new();
    for (i, path) in chain.iter().enumerate() {
        if i > 0 {
            text.push_str(" -> ");
        }
        let _ = write!(text, "{}", path.display());
    }
    text
}
