//! Error taxonomy for the publish pipeline.

use assetpub_storage::StorageError;
use thiserror::Error;

/// Result type for publish operations.
pub type PublishResult<T> = Result<T, PublishError>;

/// Status codes reported to RPC callers.
///
/// Values match the gRPC status codes used by the hosting runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RpcCode {
    InvalidArgument = 3,
    NotFound = 5,
    Internal = 13,
}

impl RpcCode {
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Errors that terminate a publish request.
///
/// None of these are retried; every one aborts the request without a
/// response payload.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Request payload was empty or not a well-formed request object.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No readable asset exists at the resolved path.
    #[error("asset not found: {0}")]
    AssetNotFound(String),

    /// The asset store returned bytes that are not well-formed JSON.
    #[error("asset corrupt: {0}")]
    AssetCorrupt(String),

    /// The storage sink rejected the write.
    #[error("publish failed: {0}")]
    PublishFailed(#[from] StorageError),

    /// Response assembly failed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PublishError {
    /// Returns the status code reported to the caller.
    pub fn code(&self) -> RpcCode {
        match self {
            Self::InvalidInput(_) => RpcCode::InvalidArgument,
            Self::AssetNotFound(_) => RpcCode::NotFound,
            Self::AssetCorrupt(_) | Self::PublishFailed(_) | Self::Internal(_) => {
                RpcCode::Internal
            }
        }
    }

    /// Returns the message safe to show the caller. Internal details stay
    /// in the logs.
    pub fn client_message(&self) -> &'static str {
        match self.code() {
            RpcCode::InvalidArgument => "input contained invalid data",
            RpcCode::NotFound => "file not found",
            RpcCode::Internal => "internal server error",
        }
    }
}
