//! HTTP API for the assetpub file handler.
//!
//! Two endpoints, both answering with JSON:
//!
//! - `POST /v1/rpc/fileHandler`: raw request payload in, publish response out
//! - `GET|POST /v1/rpc/healthCheck`: `{"health":"OK"}`

pub mod config;

use assetpub_publish::{health_check, AssetPublisher, PublishError, RpcCode};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

/// Error body returned for every failed call.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorBody {
    pub code: u32,
    pub message: String,
}

/// Wraps a [`PublishError`] so it can be returned from a handler.
#[derive(Debug)]
pub struct ApiError(pub PublishError);

impl From<PublishError> for ApiError {
    fn from(err: PublishError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0.code() {
            RpcCode::InvalidArgument => StatusCode::BAD_REQUEST,
            RpcCode::NotFound => StatusCode::NOT_FOUND,
            RpcCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.0.code().as_u32(),
            message: self.0.client_message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

fn json_text(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn file_handler(
    State(publisher): State<AssetPublisher>,
    payload: String,
) -> Result<Response, ApiError> {
    let body = tokio::task::spawn_blocking(move || publisher.handle(&payload))
        .await
        .map_err(|e| PublishError::Internal(format!("handler task failed: {e}")))??;
    Ok(json_text(body))
}

async fn health_handler() -> Result<Response, ApiError> {
    Ok(json_text(health_check()?))
}

/// Build the HTTP API router around the given publisher.
pub fn build_router(publisher: AssetPublisher) -> Router {
    Router::new()
        .route("/v1/rpc/fileHandler", post(file_handler))
        .route("/v1/rpc/healthCheck", get(health_handler).post(health_handler))
        .with_state(publisher)
}
