pub mod hash;
pub mod shutdown;
pub mod stats;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

// ─── Unified error type ──────────────────────────────────────────

/// Every failure a client can see. Bodies are plain text because the
/// submission and lookup endpoints speak plain text.
#[derive(Debug)]
pub enum AppError {
    NoPassword,
    InvalidLink(String),
    Stats,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NoPassword => {
                (StatusCode::BAD_REQUEST, "Error: no password provided".to_owned())
            }
            Self::InvalidLink(path) => {
                (StatusCode::NOT_FOUND, format!("ERROR, invalid link {path}"))
            }
            Self::Stats => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error: Failed to produce statistics".to_owned(),
            ),
        };

        (status, message).into_response()
    }
}
