//! # aria-store
//!
//! Persistence for Aria: a small key-value contract over `SQLite`, the
//! favorites set, and catalog snapshots.
//!
//! Storage failures are local by design: a missing or malformed value
//! resolves to an empty collection, and write failures are logged while the
//! in-memory state keeps working.

pub mod favorites;
pub mod kv;

pub use favorites::{
    load_catalog_snapshot, save_catalog_snapshot, FavoritesStore,
    CATALOG_KEY, FAVORITES_KEY,
};
pub use kv::{KvStore, MemoryStore, SqliteStore};
