//! Durable cache tier.
//!
//! Each key is stored as `<cache_dir>/<key>.json`, holding a `CachedData`
//! envelope. A missing file is a miss; a file that exists but does not parse
//! is an error and is never reported as a miss. Each write lands in its own
//! temporary file first and is renamed into place, so a reader never sees
//! half a record and overlapping writers never share a temp file.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::Dataset;

use super::CacheKey;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to create cache directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read cache record {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("Corrupt cache record {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize cache record {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write cache record {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew (negative ages)
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            if minutes % 60 >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            if (minutes % 1440) / 60 >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }
}

pub struct DiskCache {
    cache_dir: PathBuf,
}

impl DiskCache {
    pub fn new(cache_dir: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&cache_dir).map_err(|source| StoreError::CreateDir {
            path: cache_dir.clone(),
            source,
        })?;
        Ok(Self { cache_dir })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn cache_path(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key.file_stem()))
    }

    async fn read_record<T: DeserializeOwned>(
        &self,
        key: &CacheKey,
    ) -> Result<Option<CachedData<T>>, StoreError> {
        let contents = match tokio::fs::read_to_string(self.cache_path(key)).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    key: key.to_string(),
                    source,
                })
            }
        };

        let cached = serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
            key: key.to_string(),
            source,
        })?;

        Ok(Some(cached))
    }

    async fn write_record<T: Serialize>(&self, key: &CacheKey, data: &T) -> Result<(), StoreError> {
        let contents =
            serde_json::to_string_pretty(&CachedData::new(data)).map_err(|source| {
                StoreError::Serialize {
                    key: key.to_string(),
                    source,
                }
            })?;

        let dir = self.cache_dir.clone();
        let path = self.cache_path(key);
        let prefix = format!(".{}.", key.file_stem());
        let written = tokio::task::spawn_blocking(move || -> io::Result<()> {
            // Dropped (and removed) on any error before persist
            let mut temp = tempfile::Builder::new()
                .prefix(&prefix)
                .suffix(".tmp")
                .tempfile_in(&dir)?;
            temp.write_all(contents.as_bytes())?;
            temp.persist(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(io::Error::other)
        .and_then(|result| result);

        written.map_err(|source| StoreError::Write {
            key: key.to_string(),
            source,
        })
    }

    /// Load the record for `key` with its timestamp.
    pub async fn load_cached(
        &self,
        key: &CacheKey,
    ) -> Result<Option<CachedData<Dataset>>, StoreError> {
        self.read_record(key).await
    }

    /// Load the dataset for `key`. `Ok(None)` when nothing is stored.
    pub async fn load(&self, key: &CacheKey) -> Result<Option<Dataset>, StoreError> {
        Ok(self.load_cached(key).await?.map(|cached| cached.data))
    }

    /// Best-effort save. Failures are logged, never returned.
    pub async fn save(&self, key: &CacheKey, data: &Dataset) {
        match self.write_record(key, &data).await {
            Ok(()) => debug!(key = %key, records = data.len(), "Saved cache record"),
            Err(e) => warn!(key = %key, error = %e, "Failed to save cache record"),
        }
    }

    /// Best-effort removal. A missing record is not a failure.
    pub async fn delete(&self, key: &CacheKey) {
        match tokio::fs::remove_file(self.cache_path(key)).await {
            Ok(()) => debug!(key = %key, "Deleted cache record"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(key = %key, error = %e, "Failed to delete cache record"),
        }
    }

    /// Human-readable age of the stored record, if one is readable.
    pub async fn age(&self, key: &CacheKey) -> Option<String> {
        match self.load_cached(key).await {
            Ok(cached) => cached.map(|c| c.age_display()),
            Err(e) => {
                debug!(key = %key, error = %e, "Failed to load cache for age display");
                None
            }
        }
    }
}
