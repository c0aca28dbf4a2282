//! Persistent cache of structurally parsed package metadata.
//!
//! Entries live in a single bucket keyed by file fingerprint. The bucket
//! also records the application version that wrote it; opening the cache
//! with a different version drops the whole bucket so every file is parsed
//! again.
//!
//! The cache is an optimization only. Read and decode failures count as
//! misses and write failures are logged and otherwise ignored.

use switch_shelf_core::ContentMap;

use crate::store::{KvStore, StoreError};

/// Bucket holding all cached metadata.
pub const CACHE_BUCKET: &str = "deep-scan";

/// Key of the application version marker inside [`CACHE_BUCKET`].
pub const VERSION_KEY: &[u8] = b"app_version";

/// Fingerprint-keyed metadata cache on top of any [`KvStore`].
pub struct MetadataCache<S: KvStore> {
    store: S,
    app_version: String,
}

impl<S: KvStore> MetadataCache<S> {
    /// Wrap a store, dropping cached data written by another app version.
    pub fn open(store: S, app_version: impl Into<String>) -> Result<Self, StoreError> {
        let mut cache = Self {
            store,
            app_version: app_version.into(),
        };
        cache.invalidate_if_stale_version()?;
        Ok(cache)
    }

    /// Wrap a store as is, without looking at its version marker. For
    /// inspecting a cache that may belong to another version.
    pub fn attach(store: S, app_version: impl Into<String>) -> Self {
        Self {
            store,
            app_version: app_version.into(),
        }
    }

    /// Whether the stored marker matches the running version. A cache
    /// that was never written counts as current.
    pub fn is_current(&self) -> Result<bool, StoreError> {
        if !self.store.bucket_exists(CACHE_BUCKET)? {
            return Ok(true);
        }
        Ok(self.stored_version()?.as_deref() == Some(self.app_version.as_str()))
    }

    /// Delete the cache bucket unless its version marker matches the running
    /// version. Returns whether anything was dropped.
    ///
    /// A bucket without a marker is treated as stale.
    pub fn invalidate_if_stale_version(&mut self) -> Result<bool, StoreError> {
        if !self.store.bucket_exists(CACHE_BUCKET)? {
            return Ok(false);
        }

        let stored = self.stored_version()?;
        if stored.as_deref() == Some(self.app_version.as_str()) {
            return Ok(false);
        }

        log::info!(
            "Metadata cache version {} does not match {}, clearing",
            stored.as_deref().unwrap_or("<none>"),
            self.app_version
        );
        self.store.delete_bucket(CACHE_BUCKET)
    }

    /// Version marker currently stored, if the bucket exists and has one.
    pub fn stored_version(&self) -> Result<Option<String>, StoreError> {
        let raw = self.store.get(CACHE_BUCKET, VERSION_KEY)?;
        Ok(raw.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Look up the metadata cached for a fingerprint.
    pub fn get(&self, fingerprint: &str) -> Option<ContentMap> {
        let raw = match self.store.get(CACHE_BUCKET, fingerprint.as_bytes()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read cache entry for {}: {}", fingerprint, e);
                return None;
            }
        };

        match serde_json::from_slice::<ContentMap>(&raw) {
            Ok(contents) => Some(contents),
            Err(e) => {
                log::warn!("Failed to decode cache entry for {}: {}", fingerprint, e);
                None
            }
        }
    }

    /// Store metadata for a fingerprint. Returns whether the write succeeded.
    ///
    /// Creates the bucket on first use and stamps it with the running
    /// version in the same transaction.
    pub fn put(&mut self, fingerprint: &str, contents: &ContentMap) -> bool {
        match self.try_put(fingerprint, contents) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to cache metadata for {}: {}", fingerprint, e);
                false
            }
        }
    }

    fn try_put(&mut self, fingerprint: &str, contents: &ContentMap) -> Result<(), CacheWriteError> {
        let encoded = serde_json::to_vec(contents)?;
        let creating = !self.store.bucket_exists(CACHE_BUCKET)?;

        let mut entries: Vec<(&[u8], &[u8])> = Vec::with_capacity(2);
        if creating {
            entries.push((VERSION_KEY, self.app_version.as_bytes()));
        }
        entries.push((fingerprint.as_bytes(), encoded.as_slice()));
        self.store.put_batch(CACHE_BUCKET, &entries)?;
        Ok(())
    }

    /// Drop every cached entry. Returns whether there was anything to drop.
    pub fn clear(&mut self) -> Result<bool, StoreError> {
        self.store.delete_bucket(CACHE_BUCKET)
    }

    /// Number of cached fingerprints (the version marker is not counted).
    pub fn entry_count(&self) -> Result<usize, StoreError> {
        let total = self.store.count(CACHE_BUCKET)?;
        let has_marker = self.store.get(CACHE_BUCKET, VERSION_KEY)?.is_some();
        Ok(total - usize::from(has_marker))
    }

    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

#[derive(Debug, thiserror::Error)]
enum CacheWriteError {
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}
