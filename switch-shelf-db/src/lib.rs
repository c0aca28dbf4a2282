//! Persistence layer for the package metadata cache.
//!
//! Provides a bucketed key-value store (SQLite via rusqlite with the bundled
//! feature, or in memory) and the version-guarded metadata cache built on it.

pub mod cache;
pub mod schema;
pub mod store;

pub use cache::{CACHE_BUCKET, MetadataCache, VERSION_KEY};
pub use schema::{SchemaError, open_database, open_database_read_only, open_memory};
pub use store::{KvStore, MemoryStore, SqliteStore, StoreError};
