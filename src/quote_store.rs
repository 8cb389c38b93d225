//! Persistence of the daily quote cache between runs.

use std::fs;
use std::io;
use std::path::PathBuf;

use zenith_core::QuoteCache;

/// `quote_cache.json` in the data directory.
#[derive(Debug, Clone)]
pub struct FileQuoteStore {
    data_dir: PathBuf,
}

impl FileQuoteStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn path(&self) -> PathBuf {
        self.data_dir.join("quote_cache.json")
    }

    /// Loads the cache; a missing or unreadable file yields an empty cache.
    pub fn load(&self) -> QuoteCache {
        let path = self.path();
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable quote cache {}: {}", path.display(), e);
                QuoteCache::default()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => QuoteCache::default(),
            Err(e) => {
                tracing::warn!("Failed to read quote cache {}: {}", path.display(), e);
                QuoteCache::default()
            }
        }
    }

    pub fn save(&self, cache: &QuoteCache) -> io::Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        let json = serde_json::to_string(cache).map_err(io::Error::other)?;
        fs::write(self.path(), json)
    }
}
