//! Request-level failures and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::observability::metrics;
use crate::security::AddressError;

#[derive(Debug, thiserror::Error)]
pub enum IngressError {
    #[error(transparent)]
    Address(#[from] AddressError),
    #[error("failed to read request body: {0}")]
    Body(axum::Error),
}

impl IntoResponse for IngressError {
    fn into_response(self) -> Response {
        metrics::record_request("error");
        match self {
            IngressError::Address(e) => {
                tracing::error!(error = %e, "Caller address resolution failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            IngressError::Body(e) => {
                tracing::warn!(error = %e, "Request body aborted");
                (StatusCode::BAD_REQUEST, "bad request").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let response = IngressError::from(AddressError::AddressUndetermined).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = IngressError::Body(axum::Error::new("reset")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
