//! Storage record and permission model.
//!
//! Permission values follow the key-value store convention used by game
//! backends: read is `0` (nobody), `1` (owner) or `2` (public); write is
//! `0` (nobody) or `1` (owner).

use std::fmt;

use crate::error::StorageError;

/// Who may read a stored object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ReadPermission {
    NoRead = 0,
    OwnerRead = 1,
    PublicRead = 2,
}

impl ReadPermission {
    /// Returns the numeric value persisted by sinks.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<i64> for ReadPermission {
    type Error = StorageError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NoRead),
            1 => Ok(Self::OwnerRead),
            2 => Ok(Self::PublicRead),
            other => Err(StorageError::InvalidData(format!(
                "unknown read permission: {other}"
            ))),
        }
    }
}

impl fmt::Display for ReadPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoRead => "no-read",
            Self::OwnerRead => "owner-read",
            Self::PublicRead => "public-read",
        };
        f.write_str(name)
    }
}

/// Who may overwrite a stored object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WritePermission {
    NoWrite = 0,
    OwnerWrite = 1,
}

impl WritePermission {
    /// Returns the numeric value persisted by sinks.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<i64> for WritePermission {
    type Error = StorageError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NoWrite),
            1 => Ok(Self::OwnerWrite),
            other => Err(StorageError::InvalidData(format!(
                "unknown write permission: {other}"
            ))),
        }
    }
}

impl fmt::Display for WritePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoWrite => "no-write",
            Self::OwnerWrite => "owner-write",
        };
        f.write_str(name)
    }
}

/// A single object written to a sink, addressed by `(collection, key)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRecord {
    pub collection: String,
    pub key: String,
    pub value: Vec<u8>,
    pub read_permission: ReadPermission,
    pub write_permission: WritePermission,
}

impl StorageRecord {
    /// Builds the record for a published asset: publicly readable,
    /// writable only by its owner.
    pub fn published(
        collection: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            collection: collection.into(),
            key: key.into(),
            value: value.into(),
            read_permission: ReadPermission::PublicRead,
            write_permission: WritePermission::OwnerWrite,
        }
    }

    /// Returns the `(collection, key)` address of this record.
    pub fn address(&self) -> (&str, &str) {
        (&self.collection, &self.key)
    }
}
