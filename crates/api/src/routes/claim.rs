//! Route definitions for the `/claim` endpoint.

use axum::routing::post;
use axum::Router;

use crate::handlers::claim;
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// POST /claim -> claim_coupon
/// ```
///
/// Only `POST` is registered; other methods on `/claim` get 405 from
/// axum's method routing.
pub fn router() -> Router<AppState> {
    Router::new().route("/claim", post(claim::claim_coupon))
}
