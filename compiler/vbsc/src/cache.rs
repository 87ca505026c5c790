//! Parsed page cache.
//!
//! Holds fully preprocessed pages by path so repeated renders skip lexing,
//! parsing and include resolution. Entries are immutable; the cache never
//! checks modification times, so callers invalidate after editing a file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;
use vbs_ir::Block;

use crate::LoadSettings;

/// A page as parsed under particular load settings.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    path: PathBuf,
    settings: LoadSettings,
}

impl CacheKey {
    fn new(path: &Path, settings: &LoadSettings) -> Self {
        CacheKey {
            path: path.to_path_buf(),
            settings: settings.clone(),
        }
    }
}

/// Thread-safe map from page path to its preprocessed block.
///
/// Entries are keyed by path and [`LoadSettings`], so one cache can serve
/// configurations with different document roots or markup extensions.
/// Two threads missing on the same key at once both load it; the later
/// insert wins.
#[derive(Default)]
pub struct ScriptCache {
    entries: RwLock<FxHashMap<CacheKey, Arc<Block>>>,
}

impl ScriptCache {
    pub fn new() -> Self {
        ScriptCache::default()
    }

    pub fn get(&self, path: &Path, settings: &LoadSettings) -> Option<Arc<Block>> {
        self.entries.read().get(&CacheKey::new(path, settings)).cloned()
    }

    pub fn insert(&self, path: &Path, settings: &LoadSettings, block: Arc<Block>) {
        self.entries
            .write()
            .insert(CacheKey::new(path, settings), block);
    }

    /// Cached block for `path` under `settings`, or the result of `load`
    /// stored under them.
    pub fn get_or_load<E>(
        &self,
        path: &Path,
        settings: &LoadSettings,
        load: impl FnOnce() -> Result<Block, E>,
    ) -> Result<Arc<Block>, E> {
        if let Some(block) = self.get(path, settings) {
            debug!(path = %path.display(), "cache hit");
            return Ok(block);
        }
        debug!(path = %path.display(), "cache miss");
        let block = Arc::new(load()?);
        self.insert(path, settings, Arc::clone(&block));
        Ok(block)
    }

    /// Drop every entry for `path`. Returns whether one existed.
    pub fn invalidate(&self, path: &Path) -> bool {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|key, _| key.path != path);
        entries.len() != before
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl std::fmt::Debug for ScriptCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptCache")
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::RenderConfig;

    fn settings() -> LoadSettings {
        RenderConfig::default().load_settings()
    }

    #[test]
    fn test_loads_once() {
        let cache = ScriptCache::new();
        let path = Path::new("page.asp");
        let mut loads = 0;
        for _ in 0..3 {
            let block = cache
                .get_or_load(path, &settings(), || {
                    loads += 1;
                    Ok::<_, ()>(Block::default())
                })
                .unwrap();
            assert!(block.is_empty());
        }
        assert_eq!(loads, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let cache = ScriptCache::new();
        let path = Path::new("broken.asp");
        assert_eq!(cache.get_or_load(path, &settings(), || Err("bad")), Err("bad"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_entries_are_kept_apart_by_settings() {
        let cache = ScriptCache::new();
        let path = Path::new("page.inc");
        let code = settings();
        let markup = RenderConfig::default()
            .with_markup_extensions(["inc"])
            .load_settings();
        cache.insert(path, &code, Arc::new(Block::default()));
        assert!(cache.get(path, &markup).is_none());

        let mut loads = 0;
        cache
            .get_or_load(path, &markup, || {
                loads += 1;
                Ok::<_, ()>(Block::default())
            })
            .unwrap();
        assert_eq!(loads, 1);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_invalidate_drops_every_setting() {
        let cache = ScriptCache::new();
        let path = Path::new("page.asp");
        let rooted = RenderConfig::default()
            .with_document_root("/srv/www")
            .load_settings();
        cache.insert(path, &settings(), Arc::new(Block::default()));
        cache.insert(path, &rooted, Arc::new(Block::default()));
        cache.insert(Path::new("other.asp"), &settings(), Arc::new(Block::default()));
        assert!(cache.invalidate(path));
        assert!(!cache.invalidate(path));
        assert!(cache.get(path, &settings()).is_none());
        assert_eq!(cache.len(), 1);
    }
}
