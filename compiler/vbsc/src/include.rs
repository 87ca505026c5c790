//! Locating and loading `#include` targets.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};
use vbs_ir::{Block, Include, LineOffsetTable};
use vbs_lexer::{lex, LexMode};
use vbs_parse::parse;

use crate::{RenderConfig, ScriptError};

/// Maps include directives to files and parses them.
pub trait IncludeResolver {
    /// Path named by `include`, written in the file at `from`.
    fn resolve(&self, include: &Include, from: &Path) -> PathBuf;

    /// Parse the file at `path`.
    fn load(&self, path: &Path) -> Result<Block, ScriptError>;
}

/// Resolves includes on the local filesystem.
///
/// `file="..."` is relative to the including file's directory and
/// `virtual="..."` to the document root. Both accept `\` separators.
#[derive(Clone, Debug)]
pub struct FileResolver {
    config: RenderConfig,
}

impl FileResolver {
    pub fn new(config: RenderConfig) -> Self {
        FileResolver { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

impl IncludeResolver for FileResolver {
    fn resolve(&self, include: &Include, from: &Path) -> PathBuf {
        let relative = include.file.replace('\\', "/");
        let path = normalize_path(&if include.is_virtual {
            self.config
                .document_root
                .join(relative.trim_start_matches('/'))
        } else {
            from.parent()
                .unwrap_or_else(|| Path::new(""))
                .join(relative)
        });
        debug!(file = %include.file, virtual = include.is_virtual, path = %path.display(), "resolve include");
        path
    }

    fn load(&self, path: &Path) -> Result<Block, ScriptError> {
        let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = source.len(), "load script");
        let mode = if self.config.is_markup(path) {
            LexMode::Markup
        } else {
            LexMode::Code
        };
        parse_source(path, &source, mode)
    }
}

/// Normalize a path by resolving `.` and `..` components, so the same
/// file reached along different routes compares equal.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match result.components().next_back() {
                Some(Component::Normal(_)) => {
                    result.pop();
                }
                // `/..` is `/`.
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir | Component::CurDir) | None => result.push(".."),
            },
            _ => result.push(component),
        }
    }
    result
}

/// Lex and parse `source`, reporting syntax errors with line and column.
pub fn parse_source(path: &Path, source: &str, mode: LexMode) -> Result<Block, ScriptError> {
    parse(&lex(source, mode)).map_err(|err| {
        let (line, column) = LineOffsetTable::build(source).span_start(source, err.span);
        ScriptError::Syntax {
            file: path.to_path_buf(),
            line,
            column,
            message: err.message,
            span: err.span,
        }
    })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn include(file: &str, is_virtual: bool) -> Include {
        Include {
            file: file.to_string(),
            is_virtual,
            resolved: None,
        }
    }

    #[test]
    fn test_resolve_relative_and_virtual() {
        let resolver =
            FileResolver::new(RenderConfig::default().with_document_root("/srv/www"));
        let from = Path::new("/srv/www/shop/cart.asp");
        assert_eq!(
            resolver.resolve(&include("inc\\header.inc", false), from),
            PathBuf::from("/srv/www/shop/inc/header.inc")
        );
        assert_eq!(
            resolver.resolve(&include("/lib/util.asp", true), from),
            PathBuf::from("/srv/www/lib/util.asp")
        );
    }

    #[test]
    fn test_resolve_normalizes_parent_components() {
        let resolver = FileResolver::new(RenderConfig::default());
        let from = Path::new("/srv/www/shop/cart.asp");
        assert_eq!(
            resolver.resolve(&include("../shop/./cart.asp", false), from),
            PathBuf::from("/srv/www/shop/cart.asp")
        );
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize_path(Path::new("../a/../../b")), PathBuf::from("../../b"));
        assert_eq!(normalize_path(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn test_syntax_error_position() {
        let err = parse_source(Path::new("page.vbs"), "x = 1\ny = )", LexMode::Code).unwrap_err();
        let ScriptError::Syntax {
            file, line, column, ..
        } = err
        else {
            panic!("expected a syntax error, got {err:?}");
        };
        assert_eq!(file, PathBuf::from("page.vbs"));
        assert_eq!((line, column), (2, 5));
    }
}
