//! Claim allocation policy.
//!
//! The allocator enforces one claim per identity per cooldown window and
//! delegates the race-sensitive "pick and mark a coupon" step to the
//! store's atomic conditional update. It holds no locks and no mutable
//! state of its own, so any number of requests may run through it
//! concurrently.

use chrono::Duration;
use uuid::Uuid;

use crate::coupon::Coupon;
use crate::store::{CouponStore, StoreError};
use crate::types::Timestamp;

/// How a caller is identified for rate limiting.
///
/// `token` is the returning-client marker presented by the caller (if
/// any); `origin` is the caller's network origin. Neither is a security
/// boundary -- both are caller-supplied and merely dampen abuse.
#[derive(Debug, Clone)]
pub struct IdentitySignal {
    /// Returning-client token, if the caller presented one.
    pub token: Option<String>,
    /// Network origin string (forwarded-for header or peer address).
    pub origin: String,
}

/// Opaque returning-client token issued on a successful claim.
///
/// The value is never verified server-side; its presence on a later
/// request is what short-circuits the cooldown check.
#[derive(Debug, Clone)]
pub struct ClaimToken(String);

impl ClaimToken {
    fn issue() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A successful allocation: the claimed coupon plus the token the caller
/// should present on subsequent requests.
#[derive(Debug)]
pub struct ClaimGrant {
    pub coupon: Coupon,
    pub token: ClaimToken,
}

#[derive(Debug, thiserror::Error)]
pub enum AllocationError {
    /// The identity already claimed within the cooldown window.
    #[error("Identity has already claimed within the cooldown window")]
    CooldownActive,

    /// No unclaimed coupon existed at the instant of the attempt.
    #[error("No unclaimed coupons remain")]
    PoolExhausted,

    /// The store call itself failed. Never downgraded to a rejection:
    /// a failed recency check aborts the claim entirely.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Hands out coupons, one per identity per window.
pub struct Allocator<S> {
    store: S,
    window: Duration,
}

impl<S: CouponStore> Allocator<S> {
    pub fn new(store: S, window: Duration) -> Self {
        Self { store, window }
    }

    /// Cooldown window duration.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Attempt a claim for `identity` at `now`.
    ///
    /// 1. A presented returning-client token rejects immediately, with
    ///    no store read.
    /// 2. Otherwise the origin is checked for a claim inside the window.
    /// 3. Otherwise one unclaimed coupon is atomically assigned; an
    ///    empty pool rejects with [`AllocationError::PoolExhausted`].
    ///
    /// Rejections are terminal outcomes and mutate nothing.
    pub async fn claim(
        &self,
        identity: &IdentitySignal,
        now: Timestamp,
    ) -> Result<ClaimGrant, AllocationError> {
        if identity.token.is_some() {
            tracing::debug!(origin = %identity.origin, "Claim rejected: returning-client token present");
            return Err(AllocationError::CooldownActive);
        }

        let window_start = now - self.window;
        if self
            .store
            .find_recent_claim(&identity.origin, window_start)
            .await?
            .is_some()
        {
            tracing::debug!(origin = %identity.origin, "Claim rejected: recent claim for origin");
            return Err(AllocationError::CooldownActive);
        }

        match self.store.claim_one_unclaimed(&identity.origin, now).await? {
            Some(coupon) => {
                tracing::info!(coupon_id = coupon.id, origin = %identity.origin, "Coupon claimed");
                Ok(ClaimGrant {
                    coupon,
                    token: ClaimToken::issue(),
                })
            }
            None => {
                tracing::warn!(origin = %identity.origin, "Claim rejected: coupon pool exhausted");
                Err(AllocationError::PoolExhausted)
            }
        }
    }
}
