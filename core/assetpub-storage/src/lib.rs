//! Storage sinks for assetpub.
//!
//! The publisher treats storage as a write-only collaborator: it hands a
//! [`StorageRecord`] to a [`StorageSink`] and only cares whether the write
//! succeeded. Two sinks are provided:
//!
//! - [`MemorySink`] keeps records in a `HashMap` (tests, ephemeral hosts)
//! - [`SqliteSink`] persists records in a single SQLite table

mod error;
mod record;
mod sink;
mod sqlite;

pub use error::{StorageError, StorageResult};
pub use record::{ReadPermission, StorageRecord, WritePermission};
pub use sink::{MemorySink, StorageSink};
pub use sqlite::SqliteSink;
