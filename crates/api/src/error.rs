use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use claimdrop_core::allocator::AllocationError;
use claimdrop_core::store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce the service's JSON error
/// responses. Every caller-visible body is `{ "message": ... }`; internal
/// error detail is logged, never exposed.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The caller's identity already claimed within the cooldown window.
    #[error("Identity is within the cooldown window")]
    CooldownActive { message: String },

    /// No unclaimed coupon remains.
    #[error("Coupon pool exhausted")]
    PoolExhausted,

    /// The coupon store failed; surfaced as a generic server error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A malformed request (e.g. no resolvable client origin).
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Map an allocator outcome into the HTTP error surface, phrasing
    /// the cooldown message from the configured window.
    pub fn from_allocation(err: AllocationError, window: chrono::Duration) -> Self {
        match err {
            AllocationError::CooldownActive => AppError::CooldownActive {
                message: format!(
                    "You can claim another coupon in {}.",
                    humanize_window(window)
                ),
            },
            AllocationError::PoolExhausted => AppError::PoolExhausted,
            AllocationError::Store(err) => AppError::Store(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::CooldownActive { message } => (StatusCode::FORBIDDEN, message),
            AppError::PoolExhausted => {
                (StatusCode::BAD_REQUEST, "No coupons available.".to_string())
            }
            AppError::Store(err) => {
                tracing::error!(error = %err, "Claim aborted: store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred.".to_string(),
                )
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };

        let body = json!({ "message": message });

        (status, axum::Json(body)).into_response()
    }
}

/// Phrase a cooldown window for the rejection message: whole hours as
/// hours, otherwise whole minutes, otherwise seconds.
fn humanize_window(window: chrono::Duration) -> String {
    let secs = window.num_seconds();
    if secs >= 3600 && secs % 3600 == 0 {
        let hours = secs / 3600;
        if hours == 1 {
            "1 hour".to_string()
        } else {
            format!("{hours} hours")
        }
    } else if secs >= 60 && secs % 60 == 0 {
        let minutes = secs / 60;
        if minutes == 1 {
            "1 minute".to_string()
        } else {
            format!("{minutes} minutes")
        }
    } else {
        format!("{secs} seconds")
    }
}
