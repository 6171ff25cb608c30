//! Abstract coupon inventory.
//!
//! The allocator talks to storage exclusively through [`CouponStore`];
//! the PostgreSQL implementation lives in `claimdrop-db`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::coupon::Coupon;
use crate::types::Timestamp;

/// Failure of the underlying storage. Never carries partial results:
/// a store call either completes or surfaces as this error, and a failed
/// recency check must abort the claim rather than read as "no recent
/// claim found".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Coupon store unavailable: {0}")]
    Unavailable(String),
}

/// Durable, atomic coupon inventory.
#[async_trait]
pub trait CouponStore: Send + Sync {
    /// Return any coupon claimed by `identity` with
    /// `claimed_at > window_start` (strict, so an identity becomes
    /// eligible again at exactly window's end). Existence check only;
    /// no ordering guarantee.
    async fn find_recent_claim(
        &self,
        identity: &str,
        window_start: Timestamp,
    ) -> Result<Option<Coupon>, StoreError>;

    /// Atomically select one unclaimed coupon, mark it claimed by
    /// `identity` at `now`, and return the updated record.
    ///
    /// Selection and update must be a single atomic step: under
    /// concurrent invocation no two callers may ever be assigned the
    /// same coupon. Returns `Ok(None)` when no unclaimed coupon exists
    /// at the instant of the attempt.
    async fn claim_one_unclaimed(
        &self,
        identity: &str,
        now: Timestamp,
    ) -> Result<Option<Coupon>, StoreError>;
}

#[async_trait]
impl<S: CouponStore + ?Sized> CouponStore for Arc<S> {
    async fn find_recent_claim(
        &self,
        identity: &str,
        window_start: Timestamp,
    ) -> Result<Option<Coupon>, StoreError> {
        (**self).find_recent_claim(identity, window_start).await
    }

    async fn claim_one_unclaimed(
        &self,
        identity: &str,
        now: Timestamp,
    ) -> Result<Option<Coupon>, StoreError> {
        (**self).claim_one_unclaimed(identity, now).await
    }
}
