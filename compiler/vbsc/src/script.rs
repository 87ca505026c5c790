//! Loading and rendering pages.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::info;
use vbs_eval::Interpreter;
use vbs_ir::Block;

use crate::{
    preprocess, FileResolver, HostEnvironment, IncludeResolver, RenderConfig, ScriptCache,
    ScriptError,
};

/// A parsed page with its includes spliced in.
#[derive(Clone, Debug)]
pub struct Script {
    path: PathBuf,
    block: Arc<Block>,
}

impl Script {
    /// Wrap an already preprocessed block.
    pub fn new(path: impl Into<PathBuf>, block: Arc<Block>) -> Self {
        Script {
            path: path.into(),
            block,
        }
    }

    /// Parse `path` and resolve its includes.
    pub fn load(path: &Path, resolver: &dyn IncludeResolver) -> Result<Self, ScriptError> {
        let mut block = resolver.load(path)?;
        preprocess(&mut block, path, resolver)?;
        Ok(Script::new(path, Arc::new(block)))
    }

    /// Like [`load`](Self::load), reusing a block cached for `path` under
    /// the resolver's load settings.
    pub fn load_cached(
        path: &Path,
        resolver: &FileResolver,
        cache: &ScriptCache,
    ) -> Result<Self, ScriptError> {
        let settings = resolver.config().load_settings();
        let block = cache.get_or_load(path, &settings, || {
            let mut block = resolver.load(path)?;
            preprocess(&mut block, path, resolver)?;
            Ok::<_, ScriptError>(block)
        })?;
        Ok(Script::new(path, block))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    /// Run the page against a fresh environment seeded with `host`.
    pub fn render(&self, host: &HostEnvironment, config: &RenderConfig) -> Result<(), ScriptError> {
        let started = Instant::now();
        let mut interpreter = Interpreter::new(config.eval.clone());
        let root = host.install(interpreter.env_mut())?;
        let page = interpreter.env_mut().push(root);
        if config.option_explicit {
            interpreter.env_mut().set_explicit(page, true);
        }
        interpreter.run_block(&self.block, page)?;
        info!(
            path = %self.path.display(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "rendered"
        );
        Ok(())
    }
}

/// Load `path` from disk (through `cache`) and render it.
pub fn render_file(
    path: &Path,
    config: &RenderConfig,
    cache: &ScriptCache,
    host: &HostEnvironment,
) -> Result<(), ScriptError> {
    let resolver = FileResolver::new(config.clone());
    Script::load_cached(path, &resolver, cache)?.render(host, config)
}
