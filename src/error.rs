// =============================================================================
// API Errors — mapped onto HTTP responses
// =============================================================================
//
// Every failure a handler can return, with its status code. Bodies are always
// `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::market_data::FetchError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself is unusable (e.g. blank symbol).
    #[error("{0}")]
    BadRequest(String),

    /// Upstream bars could not be obtained; no indicators were computed.
    #[error("Error fetching data: {0}")]
    DataUnavailable(#[from] FetchError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::DataUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.to_string() });
        (self.status(), axum::Json(body)).into_response()
    }
}
