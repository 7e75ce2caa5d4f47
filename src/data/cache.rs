use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use anyhow::Result;

use super::loader::load_file;
use super::model::GenreDataset;

// ---------------------------------------------------------------------------
// Process-wide memoized load
// ---------------------------------------------------------------------------

type Cache = Mutex<HashMap<PathBuf, Arc<GenreDataset>>>;

fn cache() -> &'static Cache {
    static CACHE: OnceLock<Cache> = OnceLock::new();
    CACHE.get_or_init(Default::default)
}

/// Cache key: the canonical path when it resolves, the path as given otherwise.
fn cache_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Load `path` once per process; later calls share the same dataset.
/// Errors are returned to the caller and not remembered.
pub fn load_cached(path: &Path) -> Result<Arc<GenreDataset>> {
    let key = cache_key(path);

    if let Some(ds) = lock().get(&key) {
        log::debug!("Dataset cache hit for {}", key.display());
        return Ok(Arc::clone(ds));
    }

    // Read outside the lock; a concurrent loader of the same file loses the race.
    let dataset = Arc::new(load_file(path)?);
    let entry = lock().entry(key).or_insert(dataset).clone();
    Ok(entry)
}

/// Forget the cached dataset for `path`, if any.
pub fn invalidate(path: &Path) {
    if lock().remove(&cache_key(path)).is_some() {
        log::debug!("Dropped cached dataset for {}", path.display());
    }
}

fn lock() -> std::sync::MutexGuard<'static, HashMap<PathBuf, Arc<GenreDataset>>> {
    // A panic while holding the lock cannot leave the map half-updated.
    cache().lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
