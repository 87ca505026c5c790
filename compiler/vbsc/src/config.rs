//! Render configuration.

use std::path::{Path, PathBuf};

use vbs_eval::EvalConfig;

/// Settings for loading and running pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Directory `#include virtual="..."` paths are resolved against.
    pub document_root: PathBuf,
    /// File extensions (without the dot, compared case-insensitively) whose
    /// files start in literal text rather than script code.
    pub markup_extensions: Vec<String>,
    /// Start every page with `Option Explicit` in effect.
    pub option_explicit: bool,
    pub eval: EvalConfig,
}

impl RenderConfig {
    #[must_use]
    pub fn with_document_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.document_root = root.into();
        self
    }

    #[must_use]
    pub fn with_markup_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markup_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_option_explicit(mut self, explicit: bool) -> Self {
        self.option_explicit = explicit;
        self
    }

    #[must_use]
    pub fn with_eval(mut self, eval: EvalConfig) -> Self {
        self.eval = eval;
        self
    }

    /// Whether `path` starts in literal text.
    pub fn is_markup(&self, path: &Path) -> bool {
        self.load_settings().is_markup(path)
    }

    /// The part of the configuration that affects how a page parses.
    pub fn load_settings(&self) -> LoadSettings {
        LoadSettings {
            document_root: self.document_root.clone(),
            markup_extensions: self
                .markup_extensions
                .iter()
                .map(|ext| ext.to_ascii_lowercase())
                .collect(),
        }
    }
}

/// Settings a parsed page depends on. Two configurations with equal load
/// settings produce the same preprocessed block for a path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LoadSettings {
    document_root: PathBuf,
    /// Lowercased.
    markup_extensions: Vec<String>,
}

impl LoadSettings {
    fn is_markup(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.markup_extensions
                    .iter()
                    .any(|markup| markup.eq_ignore_ascii_case(ext))
            })
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            document_root: PathBuf::from("."),
            markup_extensions: vec!["asp".to_string()],
            option_explicit: false,
            eval: EvalConfig::default(),
        }
    }
}
