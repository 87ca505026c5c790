// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end page rendering against files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use vbs_eval::EvalErrorKind;
use vbsc::{render_file, AspHost, RenderConfig, Response, ScriptCache, ScriptError};

/// A document root in a temporary directory.
struct Site {
    dir: TempDir,
}

impl Site {
    fn new() -> Self {
        Site {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    fn write(&self, path: &str, content: &str) -> PathBuf {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full, content).unwrap();
        full
    }

    fn config(&self) -> RenderConfig {
        RenderConfig::default().with_document_root(self.dir.path())
    }

    fn render_with(
        &self,
        page: &Path,
        config: &RenderConfig,
        host: AspHost,
    ) -> (Response, Result<(), ScriptError>) {
        let result = render_file(page, config, &ScriptCache::new(), &host.environment());
        (host.response().take(), result)
    }

    fn render(&self, page: &Path) -> Response {
        let (response, result) = self.render_with(page, &self.config(), AspHost::new());
        result.expect("page should render");
        response
    }
}

#[test]
fn test_text_code_and_included_sub() {
    let site = Site::new();
    site.write(
        "lib.inc",
        "sub doThing\n  Response.Write \"-\"\nend sub\n",
    );
    let page = site.write(
        "index.asp",
        "header<% doThing : dim x %>footer<!-- #include file=\"lib.inc\" -->",
    );
    assert_eq!(site.render(&page).body, "header-footer");
}

#[test]
fn test_print_blocks() {
    let site = Site::new();
    let page = site.write("sum.asp", "1 + 2 = <%= 1 + 2 %>, <%= \"a\" & \"b\" %>");
    assert_eq!(site.render(&page).body, "1 + 2 = 3, ab");
}

#[test]
fn test_virtual_include_and_query_string() {
    let site = Site::new();
    site.write(
        "common/util.asp",
        "<% function twice(n)\n  twice = n * 2\nend function %>",
    );
    let page = site.write(
        "shop/item.asp",
        "<!-- #include virtual=\"/common/util.asp\" --><%= twice(Request.QueryString(\"n\")) %>",
    );
    let (response, result) =
        site.render_with(&page, &site.config(), AspHost::new().with_query("N", "21"));
    result.unwrap();
    assert_eq!(response.body, "42");
}

#[test]
fn test_include_runs_at_its_position() {
    let site = Site::new();
    site.write("part.asp", "<% count = count + 1 %>[<%= count %>]");
    let page = site.write(
        "page.asp",
        "<% count = 10 %><!-- #include file=\"part.asp\" -->|<!-- #include file=\"part.asp\" -->",
    );
    assert_eq!(site.render(&page).body, "[11]|[12]");
}

#[test]
fn test_headers() {
    let site = Site::new();
    let page = site.write("h.asp", "<% Response.AddHeader \"X-Test\", \"yes\" %>ok");
    let response = site.render(&page);
    assert_eq!(
        response.headers,
        vec![("X-Test".to_string(), "yes".to_string())]
    );
    assert_eq!(response.body, "ok");
}

#[test]
fn test_host_objects_are_readonly() {
    let site = Site::new();
    let page = site.write("r.asp", "<% Response = 1 %>");
    let (_, result) = site.render_with(&page, &site.config(), AspHost::new());
    let Err(ScriptError::Runtime(err)) = result else {
        panic!("expected a runtime error, got {result:?}");
    };
    assert!(matches!(err.kind, EvalErrorKind::ReadonlyWrite { .. }));
}

#[test]
fn test_option_explicit_from_config() {
    let site = Site::new();
    let page = site.write("e.asp", "<% x = 1 %>");
    let config = site.config().with_option_explicit(true);
    let (_, result) = site.render_with(&page, &config, AspHost::new());
    let Err(ScriptError::Runtime(err)) = result else {
        panic!("expected a runtime error, got {result:?}");
    };
    assert_eq!(
        err.kind,
        EvalErrorKind::UndeclaredVariable {
            name: "x".to_string()
        }
    );
}

#[test]
fn test_procedure_included_into_a_body_is_rejected() {
    let site = Site::new();
    site.write("inner.vbs", "sub inner\nend sub\n");
    let page = site.write(
        "n.asp",
        "<% sub outer %><!-- #include file=\"inner.vbs\" --><% end sub %><% outer %>",
    );
    let (_, result) = site.render_with(&page, &site.config(), AspHost::new());
    let Err(ScriptError::Runtime(err)) = result else {
        panic!("expected a runtime error, got {result:?}");
    };
    assert_eq!(
        err.kind,
        EvalErrorKind::Unsupported {
            feature: "declaring inner inside a procedure".to_string()
        }
    );
}

#[test]
fn test_output_before_runtime_error_is_kept() {
    let site = Site::new();
    let page = site.write("z.asp", "before<% x = 1 / 0 %>after");
    let (response, result) = site.render_with(&page, &site.config(), AspHost::new());
    assert!(matches!(result, Err(ScriptError::Runtime(_))));
    assert_eq!(response.body, "before");
}

#[test]
fn test_syntax_error_names_the_included_file() {
    let site = Site::new();
    let broken = site.write("broken.vbs", "x = 1\ny = )\n");
    let page = site.write("p.asp", "<!-- #include file=\"broken.vbs\" -->");
    let (_, result) = site.render_with(&page, &site.config(), AspHost::new());
    let Err(ScriptError::Syntax { file, line, .. }) = result else {
        panic!("expected a syntax error, got {result:?}");
    };
    assert_eq!(file, broken);
    assert_eq!(line, 2);
}

#[test]
fn test_missing_include_is_io_error() {
    let site = Site::new();
    let page = site.write("p.asp", "<!-- #include file=\"nope.inc\" -->");
    let (_, result) = site.render_with(&page, &site.config(), AspHost::new());
    assert!(matches!(result, Err(ScriptError::Io { .. })));
}

#[test]
fn test_include_cycle() {
    let site = Site::new();
    site.write("b.asp", "<!-- #include file=\"a.asp\" -->");
    let page = site.write("a.asp", "<!-- #include file=\"b.asp\" -->");
    let (_, result) = site.render_with(&page, &site.config(), AspHost::new());
    let Err(ScriptError::IncludeCycle { chain }) = result else {
        panic!("expected an include cycle, got {result:?}");
    };
    assert_eq!(chain.len(), 3);
    assert_eq!(chain.first(), chain.last());
}

#[test]
fn test_include_cycle_through_parent_directory() {
    let site = Site::new();
    let page = site.write("shop/a.asp", "<!-- #include file=\"../shop/a.asp\" -->");
    let (_, result) = site.render_with(&page, &site.config(), AspHost::new());
    let Err(ScriptError::IncludeCycle { chain }) = result else {
        panic!("expected an include cycle, got {result:?}");
    };
    assert_eq!(chain.len(), 2);
    assert_eq!(chain.first(), chain.last());
}

#[test]
fn test_shared_cache_respects_markup_extensions() {
    let site = Site::new();
    let page = site.write("lib.inc", "<% Response.Write \"code\" %>");
    let cache = ScriptCache::new();
    let host = AspHost::new();

    let code = site.config();
    let markup = site.config().with_markup_extensions(["inc"]);
    // As code, `<%` is a syntax error; as markup the page writes.
    assert!(matches!(
        render_file(&page, &code, &cache, &host.environment()),
        Err(ScriptError::Syntax { .. })
    ));
    render_file(&page, &markup, &cache, &host.environment()).unwrap();
    assert_eq!(host.response().take().body, "code");
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_reuses_parsed_page() {
    let site = Site::new();
    let page = site.write("c.asp", "first");
    let config = site.config();
    let cache = ScriptCache::new();
    let host = AspHost::new();

    render_file(&page, &config, &cache, &host.environment()).unwrap();
    assert_eq!(host.response().take().body, "first");
    assert_eq!(cache.len(), 1);

    site.write("c.asp", "second");
    render_file(&page, &config, &cache, &host.environment()).unwrap();
    assert_eq!(host.response().take().body, "first");

    assert!(cache.invalidate(&page));
    render_file(&page, &config, &cache, &host.environment()).unwrap();
    assert_eq!(host.response().take().body, "second");
}
