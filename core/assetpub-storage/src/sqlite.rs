//! SQLite-backed storage sink.
//!
//! Objects live in a single `storage_objects` table keyed by
//! `(collection, key)`. Writes replace any existing row.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::record::{ReadPermission, StorageRecord, WritePermission};
use crate::sink::StorageSink;

/// Persistent sink backed by SQLite.
pub struct SqliteSink {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSink {
    /// Opens (or creates) a sink at the given path.
    ///
    /// Missing parent directories are created.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        debug!("Opened SQLite storage sink at {}", path.display());
        Self::with_connection(conn)
    }

    /// Opens an in-memory sink (for testing and ephemeral hosts).
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> StorageResult<Self> {
        let sink = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        sink.init_schema()?;
        Ok(sink)
    }

    fn init_schema(&self) -> StorageResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS storage_objects (
                collection TEXT NOT NULL,
                key TEXT NOT NULL,
                value BLOB NOT NULL,
                read_permission INTEGER NOT NULL,
                write_permission INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                PRIMARY KEY (collection, key)
            );
            ",
        )?;
        Ok(())
    }

    /// Loads the record at `(collection, key)`.
    pub fn get(&self, collection: &str, key: &str) -> StorageResult<Option<StorageRecord>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT value, read_permission, write_permission FROM storage_objects
                 WHERE collection = ?1 AND key = ?2",
                params![collection, key],
                |row| {
                    let value: Vec<u8> = row.get(0)?;
                    let read: i64 = row.get(1)?;
                    let write: i64 = row.get(2)?;
                    Ok((value, read, write))
                },
            )
            .optional()?;

        let Some((value, read, write)) = row else {
            return Ok(None);
        };
        Ok(Some(StorageRecord {
            collection: collection.to_string(),
            key: key.to_string(),
            value,
            read_permission: ReadPermission::try_from(read)?,
            write_permission: WritePermission::try_from(write)?,
        }))
    }

    /// Returns the millisecond timestamp of the last write to `(collection, key)`.
    pub fn updated_at(&self, collection: &str, key: &str) -> StorageResult<Option<i64>> {
        let conn = self.lock()?;
        let ts = conn
            .query_row(
                "SELECT updated_at FROM storage_objects WHERE collection = ?1 AND key = ?2",
                params![collection, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(ts)
    }

    /// Returns the number of stored objects.
    pub fn count(&self) -> StorageResult<usize> {
        let conn = self.lock()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM storage_objects", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Storage("sqlite connection lock poisoned".to_string()))
    }
}

impl StorageSink for SqliteSink {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    fn write(&self, record: &StorageRecord) -> StorageResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO storage_objects
                (collection, key, value, read_permission, write_permission, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.collection,
                record.key,
                record.value,
                record.read_permission.as_u8(),
                record.write_permission.as_u8(),
                chrono::Utc::now().timestamp_millis(),
            ],
        )?;
        debug!(
            "Stored {} bytes at {}/{}",
            record.value.len(),
            record.collection,
            record.key
        );
        Ok(())
    }
}
