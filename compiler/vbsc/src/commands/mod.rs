//! Command handlers for the `vbs` binary.
//!
//! Shared helpers (`read_file`, `report_error`) live in the module root.

use std::path::Path;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

use crate::ScriptError;

mod debug;
mod run;

pub use debug::{lex_file, parse_file};
pub use run::{parse_run_options, run_file, RunOptions};

/// Read a source file, exiting with a message if it cannot be read.
pub(crate) fn read_file(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("error: cannot read '{}': {err}", path.display());
            std::process::exit(1);
        }
    }
}

/// Print `err` to stderr. Syntax errors get a source snippet.
pub fn report_error(err: &ScriptError) {
    if let ScriptError::Syntax {
        file,
        message,
        span,
        ..
    } = err
    {
        if let Ok(source) = std::fs::read_to_string(file) {
            let name = file.display().to_string();
            let range = span.start as usize..span.end as usize;
            let report = Report::build(ReportKind::Error, name.as_str(), range.start)
                .with_config(Config::default().with_index_type(IndexType::Byte))
                .with_message("syntax error")
                .with_label(
                    Label::new((name.as_str(), range))
                        .with_message(message)
                        .with_color(Color::Red),
                )
                .finish();
            if report
                .eprint((name.as_str(), Source::from(source.as_str())))
                .is_ok()
            {
                return;
            }
        }
    }
    eprintln!("error: {err}");
}
