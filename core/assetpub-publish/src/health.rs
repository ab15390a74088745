//! Liveness probe.

use serde::{Deserialize, Serialize};

use crate::error::{PublishError, PublishResult};

/// Body returned by the health probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub health: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            health: "OK".to_string(),
        }
    }
}

/// Returns `{"health":"OK"}`. Takes no input and has no state.
pub fn health_check() -> PublishResult<String> {
    tracing::debug!("Health check invoked");
    serde_json::to_string(&HealthResponse::default())
        .map_err(|e| PublishError::Internal(format!("failed to encode health response: {e}")))
}
