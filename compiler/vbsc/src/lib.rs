//! Page driver for classic ASP.
//!
//! Ties the lexer, parser and evaluator together: files are loaded through
//! an [`IncludeResolver`], their `#include` directives spliced in by
//! [`preprocess`], optionally kept in a [`ScriptCache`], and rendered
//! against a [`HostEnvironment`] such as the one [`AspHost`] builds.
//!
//! ```no_run
//! use std::path::Path;
//! use vbsc::{render_file, AspHost, RenderConfig, ScriptCache};
//!
//! let config = RenderConfig::default().with_document_root("site");
//! let host = AspHost::new().with_query("id", "7");
//! let cache = ScriptCache::new();
//! render_file(Path::new("site/index.asp"), &config, &cache, &host.environment())?;
//! print!("{}", host.response().body());
//! # Ok::<(), vbsc::ScriptError>(())
//! ```

mod cache;
pub mod commands;
mod config;
mod error;
mod host;
mod include;
mod preprocess;
mod script;
mod tracing_setup;

pub use cache::ScriptCache;
pub use config::{LoadSettings, RenderConfig};
pub use error::ScriptError;
pub use host::{AspHost, HostEnvironment, Response, ResponseBuffer};
pub use include::{parse_source, FileResolver, IncludeResolver};
pub use preprocess::preprocess;
pub use script::{render_file, Script};
pub use tracing_setup::init_tracing;
