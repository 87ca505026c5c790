//! The `run` command: render a page and print what it wrote.

use std::path::{Path, PathBuf};

use crate::{render_file, AspHost, RenderConfig, ScriptCache};

use super::report_error;

/// Options accepted by `vbs run`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub file: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub query: Vec<(String, String)>,
    pub explicit: bool,
    pub headers: bool,
}

/// Parse the arguments following `run`.
pub fn parse_run_options(args: &[String]) -> Result<RunOptions, String> {
    let mut options = RunOptions::default();
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--root" | "--query" => {
                let Some(value) = args.get(i + 1) else {
                    return Err(format!("missing value for {arg}"));
                };
                if arg == "--root" {
                    options.root = Some(PathBuf::from(value));
                } else {
                    let Some((key, value)) = value.split_once('=') else {
                        return Err(format!("expected key=value after --query, found '{value}'"));
                    };
                    options.query.push((key.to_string(), value.to_string()));
                }
                i += 2;
                continue;
            }
            "--explicit" => options.explicit = true,
            "--headers" => options.headers = true,
            _ if arg.starts_with('-') => return Err(format!("unknown option '{arg}'")),
            _ if options.file.is_none() => options.file = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument '{arg}'")),
        }
        i += 1;
    }
    Ok(options)
}

/// Render the page named in `options` and print the response body.
pub fn run_file(options: &RunOptions) {
    let Some(file) = options.file.as_deref() else {
        eprintln!("error: missing file path");
        std::process::exit(1);
    };

    let root = options
        .root
        .clone()
        .or_else(|| file.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    let config = RenderConfig::default()
        .with_document_root(root)
        .with_option_explicit(options.explicit);

    let host = options
        .query
        .iter()
        .fold(AspHost::new(), |host, (key, value)| host.with_query(key, value.as_str()));
    let cache = ScriptCache::new();
    let result = render_file(file, &config, &cache, &host.environment());

    // Whatever was written before a failure is still output.
    let response = host.response().take();
    if options.headers {
        for (name, value) in &response.headers {
            println!("{name}: {value}");
        }
        println!();
    }
    print!("{}", response.body);

    if let Err(err) = result {
        report_error(&err);
        std::process::exit(1);
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_run_options() {
        let options = parse_run_options(&args(&[
            "page.asp", "--root", "site", "--query", "id=7", "--explicit",
        ]))
        .unwrap();
        assert_eq!(
            options,
            RunOptions {
                file: Some(PathBuf::from("page.asp")),
                root: Some(PathBuf::from("site")),
                query: vec![("id".to_string(), "7".to_string())],
                explicit: true,
                headers: false,
            }
        );
    }

    #[test]
    fn test_parse_run_options_errors() {
        assert!(parse_run_options(&args(&["--query", "novalue"])).is_err());
        assert!(parse_run_options(&args(&["--root"])).is_err());
        assert!(parse_run_options(&args(&["--bogus"])).is_err());
        assert!(parse_run_options(&args(&["a.asp", "b.asp"])).is_err());
    }
}
