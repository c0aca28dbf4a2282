//! Ordered byte-keyed storage with named buckets.
//!
//! The metadata cache only needs a handful of operations from its backing
//! store, captured by [`KvStore`]. [`SqliteStore`] persists them in a
//! SQLite file; [`MemoryStore`] keeps them in process for throwaway runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use crate::schema::{self, SchemaError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Bucket not found: {0}")]
    MissingBucket(String),
}

/// A transactional key-value store organized in buckets.
///
/// Keys are ordered bytewise within a bucket. Reading from a missing bucket
/// yields nothing rather than an error.
pub trait KvStore {
    fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError>;

    /// Create the bucket if it does not exist yet.
    fn create_bucket(&mut self, bucket: &str) -> Result<(), StoreError>;

    /// Delete a bucket and everything in it. Returns whether it existed.
    fn delete_bucket(&mut self, bucket: &str) -> Result<bool, StoreError>;

    fn get(&self, bucket: &str, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write into an existing bucket.
    fn put(&mut self, bucket: &str, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Atomically create the bucket if needed and write all entries.
    fn put_batch(&mut self, bucket: &str, entries: &[(&[u8], &[u8])]) -> Result<(), StoreError>;

    /// Number of keys in the bucket (0 when it does not exist).
    fn count(&self, bucket: &str) -> Result<usize, StoreError>;
}

// ── SQLite ──────────────────────────────────────────────────────────────────

/// [`KvStore`] backed by a SQLite database.
pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (or create) the database file, creating parent directories.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = schema::open_database(path)?;
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an existing database file for reading. Writes through the
    /// returned store fail.
    pub fn open_read_only(path: &Path) -> Result<Self, StoreError> {
        let conn = schema::open_database_read_only(path)?;
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a store that lives only as long as this value.
    pub fn open_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: schema::open_memory()?,
            path: None,
        })
    }

    /// Location of the database file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KvStore for SqliteStore {
    fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM buckets WHERE name = ?1)",
            params![bucket],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn create_bucket(&mut self, bucket: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO buckets (name) VALUES (?1)",
            params![bucket],
        )?;
        Ok(())
    }

    fn delete_bucket(&mut self, bucket: &str) -> Result<bool, StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM entries WHERE bucket = ?1", params![bucket])?;
        let removed = tx.execute("DELETE FROM buckets WHERE name = ?1", params![bucket])?;
        tx.commit()?;
        Ok(removed > 0)
    }

    fn get(&self, bucket: &str, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM entries WHERE bucket = ?1 AND key = ?2",
                params![bucket, key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&mut self, bucket: &str, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        if !self.bucket_exists(bucket)? {
            return Err(StoreError::MissingBucket(bucket.to_string()));
        }
        self.conn.execute(
            "INSERT INTO entries (bucket, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(bucket, key) DO UPDATE SET value = excluded.value",
            params![bucket, key, value],
        )?;
        Ok(())
    }

    fn put_batch(&mut self, bucket: &str, entries: &[(&[u8], &[u8])]) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT OR IGNORE INTO buckets (name) VALUES (?1)",
            params![bucket],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO entries (bucket, key, value) VALUES (?1, ?2, ?3)
                 ON CONFLICT(bucket, key) DO UPDATE SET value = excluded.value",
            )?;
            for (key, value) in entries {
                stmt.execute(params![bucket, key, value])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn count(&self, bucket: &str) -> Result<usize, StoreError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM entries WHERE bucket = ?1",
            params![bucket],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

// ── In-memory ───────────────────────────────────────────────────────────────

/// [`KvStore`] held entirely in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    buckets: BTreeMap<String, BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError> {
        Ok(self.buckets.contains_key(bucket))
    }

    fn create_bucket(&mut self, bucket: &str) -> Result<(), StoreError> {
        self.buckets.entry(bucket.to_string()).or_default();
        Ok(())
    }

    fn delete_bucket(&mut self, bucket: &str) -> Result<bool, StoreError> {
        Ok(self.buckets.remove(bucket).is_some())
    }

    fn get(&self, bucket: &str, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .buckets
            .get(bucket)
            .and_then(|entries| entries.get(key))
            .cloned())
    }

    fn put(&mut self, bucket: &str, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let entries = self
            .buckets
            .get_mut(bucket)
            .ok_or_else(|| StoreError::MissingBucket(bucket.to_string()))?;
        entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn put_batch(&mut self, bucket: &str, entries: &[(&[u8], &[u8])]) -> Result<(), StoreError> {
        let target = self.buckets.entry(bucket.to_string()).or_default();
        for (key, value) in entries {
            target.insert(key.to_vec(), value.to_vec());
        }
        Ok(())
    }

    fn count(&self, bucket: &str) -> Result<usize, StoreError> {
        Ok(self.buckets.get(bucket).map_or(0, BTreeMap::len))
    }
}
