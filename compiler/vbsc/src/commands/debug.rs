//! Debug commands: `parse` and `lex` for inspecting the front end.

use std::path::Path;

use vbs_lexer::{lex, LexMode};

use super::{read_file, report_error};
use crate::{parse_source, RenderConfig};

fn mode_for(path: &Path) -> LexMode {
    if RenderConfig::default().is_markup(path) {
        LexMode::Markup
    } else {
        LexMode::Code
    }
}

/// Parse a file and print each top-level statement.
pub fn parse_file(path: &str) {
    let path = Path::new(path);
    let content = read_file(path);
    match parse_source(path, &content, mode_for(path)) {
        Ok(block) => {
            println!("Parse result for '{}' ({} statements):", path.display(), block.len());
            for stmt in &block.stmts {
                println!("  {stmt}");
            }
        }
        Err(err) => {
            report_error(&err);
            std::process::exit(1);
        }
    }
}

/// Lex a file and print the token stream.
pub fn lex_file(path: &str) {
    let path = Path::new(path);
    let content = read_file(path);
    let tokens = lex(&content, mode_for(path));

    println!("Tokens for '{}' ({} tokens):", path.display(), tokens.len());
    for token in tokens.iter() {
        println!("  {:?} @ {}", token.kind, token.span);
    }
}
