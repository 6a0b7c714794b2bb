//! Canned responses.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// 404 used for unknown routes and for callers outside the allow-list.
pub fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        "not found",
    )
        .into_response()
}

pub fn payload_too_large() -> Response {
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        [(header::CONTENT_TYPE, "text/plain")],
        "payload too large",
    )
        .into_response()
}
