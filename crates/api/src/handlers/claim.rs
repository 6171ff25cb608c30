//! Handler for the `/claim` endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::identity::{ClientIdentity, CLAIM_COOKIE};
use crate::state::AppState;

/// Success payload for `POST /claim`.
#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub message: String,
    /// The redeemable coupon code.
    pub coupon: String,
}

/// POST /claim
///
/// Allocate one coupon to the caller. Outcomes:
///
/// - 200 with `{ message, coupon }`, setting the returning-client cookie
///   for the duration of the cooldown window.
/// - 403 when the caller presents the cookie or their origin claimed
///   within the window.
/// - 400 when the pool is exhausted.
/// - 500 when the store is unreachable (the claim is aborted, never
///   half-applied).
pub async fn claim_coupon(
    State(state): State<AppState>,
    identity: ClientIdentity,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let grant = state
        .allocator
        .claim(&identity.signal, Utc::now())
        .await
        .map_err(|err| AppError::from_allocation(err, state.config.claim_window()))?;

    // Opaque marker; kept away from caller-side scripting.
    let cookie = Cookie::build((CLAIM_COOKIE, grant.token.as_str().to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(state.config.claim_window_secs as i64))
        .build();

    Ok((
        jar.add(cookie),
        Json(ClaimResponse {
            message: "Coupon claimed!".to_string(),
            coupon: grant.coupon.code,
        }),
    ))
}
