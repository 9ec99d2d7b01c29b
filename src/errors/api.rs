// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the HTTP boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::ResolveError;

/// Errors returned by the HTTP API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be interpreted.
    #[error("{reason}")]
    BadInput {
        /// Why the request was rejected
        reason: String,
    },

    /// A single-index resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl ApiError {
    /// Create a `BadInput` error with a reason.
    pub fn bad_input(reason: impl Into<String>) -> Self {
        ApiError::BadInput {
            reason: reason.into(),
        }
    }

    /// HTTP status code this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Resolve(ResolveError::OutOfRange { .. })
            | ApiError::Resolve(ResolveError::InvalidIndex { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Resolve(ResolveError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Resolve(ResolveError::MaxRetriesExceeded { .. })
            | ApiError::Resolve(ResolveError::Rpc(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Chain;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::bad_input("missing parameters").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ResolveError::out_of_range(Chain::Solana, 5, 1)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ResolveError::NotFound {
                chain: Chain::Evm,
                index: 1
            })
            .status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_resolve_error_message_is_passed_through() {
        let error = ApiError::from(ResolveError::out_of_range(Chain::Solana, 200_000, 100_000));
        assert_eq!(
            error.to_string(),
            "Slot 200000 is out of range. Latest slot is 100000."
        );
    }
}
