//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use portal_query::QueryError;
use serde_json::json;
use tracing::error;

/// Errors a request handler can surface to the client.
#[derive(Debug)]
pub enum ApiError {
    /// The request failed input validation.
    BadRequest(String),
    /// The requested resource does not exist.
    NotFound(String),
    /// The client exceeded its rate limit; retry after the given seconds.
    RateLimited(u64),
    /// The query layer failed. The cause is logged, never sent to the client.
    Internal(QueryError),
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid Input", "message": message })),
            )
                .into_response(),
            Self::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": message })),
            )
                .into_response(),
            Self::RateLimited(retry_after) => (
                StatusCode::TOO_MANY_REQUESTS,
                [("retry-after", retry_after.to_string())],
                Json(json!({
                    "error": "Rate Limit Exceeded",
                    "message": "Too many requests, please try again later.",
                    "retryAfter": retry_after,
                })),
            )
                .into_response(),
            Self::Internal(err) => {
                error!(error = %err, "query layer failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Internal Server Error",
                        "message": "Failed to process the request",
                    })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::BadRequest("bad".into()), StatusCode::BAD_REQUEST),
            (ApiError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (ApiError::RateLimited(30), StatusCode::TOO_MANY_REQUESTS),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_rate_limited_sets_retry_after() {
        let response = ApiError::RateLimited(42).into_response();
        assert_eq!(response.headers()["retry-after"], "42");
    }
}
