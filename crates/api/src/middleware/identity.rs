//! Identity-signal extractor for Axum handlers.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use claimdrop_core::allocator::IdentitySignal;

use crate::error::AppError;

/// Name of the returning-client cookie set on a successful claim.
pub const CLAIM_COOKIE: &str = "coupon_claimed";

/// The caller's identity signal, extracted from transport-level data:
/// the `coupon_claimed` cookie (if presented) and the network origin.
///
/// The origin is the first entry of `x-forwarded-for` when present,
/// otherwise the socket peer address. Neither signal is authenticated;
/// they rate-limit claims, nothing more.
///
/// ```ignore
/// async fn my_handler(identity: ClientIdentity) -> AppResult<Json<()>> {
///     tracing::info!(origin = %identity.signal.origin, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ClientIdentity {
    pub signal: IdentitySignal,
}

impl<S: Send + Sync> FromRequestParts<S> for ClientIdentity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = CookieJar::from_headers(&parts.headers)
            .get(CLAIM_COOKIE)
            .map(|cookie| cookie.value().to_string());

        let origin = forwarded_for(parts)
            .or_else(|| peer_address(parts))
            .ok_or_else(|| {
                AppError::BadRequest("Client origin could not be determined".into())
            })?;

        Ok(ClientIdentity {
            signal: IdentitySignal { token, origin },
        })
    }
}

/// First entry of the `x-forwarded-for` header, if any.
fn forwarded_for(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Socket peer address, available when the server is started with
/// connect info (see `main.rs`).
fn peer_address(parts: &Parts) -> Option<String> {
    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
}
