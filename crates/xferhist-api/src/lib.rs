//! HTTP-facing types: the transfer response envelope and the error body.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use xferhist_core::Projection;
use xferhist_search::{EngineError, TransferPage};
use xferhist_storage::ErrorCategory;

// -------------------------
// Success envelope
// -------------------------

/// Body of a `get_transfers` response.
///
/// The projected records are flattened in under `simple_actions` or
/// `actions` depending on the projection.
#[derive(Debug, Clone, Serialize)]
pub struct TransferResponse {
    pub query_time_ms: f64,
    pub cached: bool,
    pub lib: u64,
    pub total: Value,
    #[serde(flatten)]
    pub records: Projection,
}

impl TransferResponse {
    pub fn from_page(page: TransferPage, query_time_ms: f64) -> Self {
        Self {
            query_time_ms,
            cached: false,
            lib: page.lib,
            total: page.total,
            records: page.projection,
        }
    }
}

// -------------------------
// Errors
// -------------------------

/// JSON error body: `{ "statusCode": 400, "error": "Bad Request", "message": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub error: String,
    pub message: String,
}

/// High-level API errors to be mapped to HTTP responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad gateway: {0}")]
    BadGateway(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self::BadGateway(msg.into())
    }
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::BadGateway(msg)
            | ApiError::Internal(msg) => msg,
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        let status = self.status_code();
        ErrorBody {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.message().to_string(),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            // Validation messages go out verbatim.
            EngineError::Validation(e) => ApiError::bad_request(e.to_string()),
            EngineError::Storage(e) => match e.category() {
                ErrorCategory::Internal => ApiError::internal(e.to_string()),
                ErrorCategory::Infrastructure | ErrorCategory::Upstream => {
                    ApiError::bad_gateway(e.to_string())
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::to_vec(&self.to_body()).unwrap_or_else(|_| b"{}".to_vec());

        let mut response = (status, body).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use xferhist_core::SimpleRecord;
    use xferhist_search::QueryError;
    use xferhist_storage::StorageError;

    #[test]
    fn validation_maps_to_bad_request_with_verbatim_message() {
        let err = ApiError::from(EngineError::Validation(QueryError::InvalidSkip));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "invalid skip parameter");

        let err = ApiError::from(EngineError::Validation(QueryError::InvalidTrack));
        assert_eq!(err.message(), "failed to parse track param");
    }

    #[test]
    fn storage_failures_map_by_category() {
        let err = ApiError::from(EngineError::Storage(StorageError::connection_error("refused")));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);

        let err = ApiError::from(EngineError::Storage(StorageError::backend_error(503, "down")));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);

        let err = ApiError::from(EngineError::Storage(StorageError::internal("oops")));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_body_shape() {
        let body = ApiError::bad_request("invalid limit parameter").to_body();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "statusCode": 400,
                "error": "Bad Request",
                "message": "invalid limit parameter"
            })
        );
    }

    #[test]
    fn into_response_sets_status_and_content_type() {
        let response = ApiError::bad_gateway("refused").into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    fn simple(block: u64) -> SimpleRecord {
        SimpleRecord {
            block,
            irreversible: None,
            timestamp: "2021-03-01T10:00:00.000".to_string(),
            transaction_id: "t1".to_string(),
            actors: "alice@active".to_string(),
            notified: "eosio.token,alice".to_string(),
            contract: "eosio.token".to_string(),
            action: "transfer".to_string(),
            data: json!({ "from": "alice" }),
        }
    }

    #[test]
    fn simple_envelope_uses_simple_actions_key() {
        let page = TransferPage {
            lib: 0,
            total: json!({ "value": 1, "relation": "eq" }),
            projection: Projection::Simple(vec![simple(5)]),
        };
        let value = serde_json::to_value(TransferResponse::from_page(page, 1.5)).unwrap();

        assert_eq!(value["query_time_ms"], 1.5);
        assert_eq!(value["cached"], false);
        assert_eq!(value["lib"], 0);
        assert_eq!(value["total"]["value"], 1);
        assert_eq!(value["simple_actions"][0]["block"], 5);
        assert!(value.get("actions").is_none());
    }

    #[test]
    fn full_envelope_uses_actions_key() {
        let page = TransferPage {
            lib: 42,
            total: json!({ "value": 0, "relation": "eq" }),
            projection: Projection::Full(Vec::new()),
        };
        let value = serde_json::to_value(TransferResponse::from_page(page, 0.2)).unwrap();
        assert_eq!(value["lib"], 42);
        assert_eq!(value["actions"], json!([]));
        assert!(value.get("simple_actions").is_none());
    }
}
