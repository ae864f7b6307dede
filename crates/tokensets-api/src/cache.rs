//! JSON file cache with per-entry expiry

use {
    crate::{
        error::{Result, TokenSetsError},
        logging::log_warn,
    },
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize, de::DeserializeOwned},
    std::{
        fs,
        path::{Path, PathBuf},
    },
};

/// Default lifetime of a cached entry
pub const DEFAULT_TTL_SECONDS: u64 = 300;

/// File-based cache storing one JSON document per key
#[derive(Debug, Clone)]
pub struct FileCache {
    cache_dir: PathBuf,
    ttl_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
    ttl_seconds: u64,
}

impl<T> CacheEntry<T> {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.cached_at).num_seconds();
        age > i64::try_from(self.ttl_seconds).unwrap_or(i64::MAX)
    }
}

impl FileCache {
    /// Open (and create if needed) a cache rooted at `cache_dir`
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        fs::create_dir_all(&cache_dir).map_err(|e| {
            TokenSetsError::InvalidData(format!(
                "Failed to create cache directory {}: {}",
                cache_dir.display(),
                e
            ))
        })?;

        Ok(Self {
            cache_dir,
            ttl_seconds: DEFAULT_TTL_SECONDS,
        })
    }

    pub fn with_ttl(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    /// Read a live entry. Expired or unreadable entries are removed and read as a miss.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.entry_path(key);
        let content = fs::read_to_string(&path).ok()?;

        let entry: CacheEntry<T> = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(_e) => {
                log_warn!("Dropping unreadable cache entry {}: {}", path.display(), _e);
                let _ = fs::remove_file(&path);
                return None;
            },
        };

        if entry.is_expired(Utc::now()) {
            let _ = fs::remove_file(&path);
            return None;
        }

        Some(entry.data)
    }

    /// Store `data` under `key`, replacing any previous entry
    pub fn set<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        let entry = CacheEntry {
            data,
            cached_at: Utc::now(),
            ttl_seconds: self.ttl_seconds,
        };
        let json = serde_json::to_string(&entry)?;

        // Write-then-rename so readers never see a partial file
        let path = self.entry_path(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|e| {
            TokenSetsError::InvalidData(format!("Failed to write cache file: {}", e))
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            TokenSetsError::InvalidData(format!("Failed to rename cache file: {}", e))
        })?;

        Ok(())
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let sanitized: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.cache_dir.join(format!("{}.json", sanitized))
    }
}

/// Default cache directory, e.g. `~/.cache/tokensets-tui`
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|d| d.join("tokensets-tui"))
        .unwrap_or_else(|| PathBuf::from(".cache").join("tokensets-tui"))
}
