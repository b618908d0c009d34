//! Key-value storage contract and backends.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use aria_core::{Error, Result};
use chrono::Utc;
use directories::ProjectDirs;
use parking_lot::Mutex;
use rusqlite::Connection;
use tracing::{info, warn};

/// Opaque string key-value storage.
///
/// Readers treat an absent value like an empty one; writers surface
/// failures as [`Error::Storage`] so callers can decide to log and move on.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// `SQLite`-backed key-value store.
pub struct SqliteStore {
    db: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the store in the platform data directory.
    pub fn new() -> Result<Self> {
        let project_dirs = ProjectDirs::from("com", "aria", "Aria")
            .ok_or_else(|| {
                Error::Storage("failed to determine data directory".to_string())
            })?;
        Self::with_dir(project_dirs.data_dir().to_path_buf())
    }

    /// Open the store inside a custom directory.
    pub fn with_dir(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir).map_err(|e| {
            Error::Storage(format!("failed to create data directory: {e}"))
        })?;

        let db_path = dir.join("aria.db");
        let db = Connection::open(&db_path).map_err(|e| {
            Error::Storage(format!("failed to open database: {e}"))
        })?;

        db.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )
        .map_err(|e| {
            Error::Storage(format!("failed to initialize database: {e}"))
        })?;

        info!("store initialized at {}", db_path.display());

        Ok(Self { db: Mutex::new(db) })
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Option<String> {
        let db = self.db.lock();
        match db.query_row(
            "SELECT value FROM kv_store WHERE key = ?",
            [key],
            |row| row.get::<_, String>(0),
        ) {
            Ok(value) => Some(value),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => {
                warn!("failed to read key {key}: {e}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let db = self.db.lock();
        db.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)",
            rusqlite::params![key, value, Utc::now().to_rfc3339()],
        )
        .map_err(|e| Error::Storage(format!("failed to write key {key}: {e}")))?;
        Ok(())
    }
}

/// In-memory key-value store.
///
/// Clones share the same underlying map, which lets tests reopen the
/// "persisted" state the way a second process would.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
