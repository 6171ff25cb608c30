//! PostgreSQL implementation of the domain's [`CouponStore`] trait.

use async_trait::async_trait;

use claimdrop_core::coupon::Coupon;
use claimdrop_core::store::{CouponStore, StoreError};
use claimdrop_core::types::Timestamp;

use crate::repositories::CouponRepo;
use crate::DbPool;

/// Coupon store backed by the `coupons` table.
///
/// Cheap to clone; wraps the shared connection pool.
#[derive(Clone)]
pub struct PgCouponStore {
    pool: DbPool,
}

impl PgCouponStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CouponStore for PgCouponStore {
    async fn find_recent_claim(
        &self,
        identity: &str,
        window_start: Timestamp,
    ) -> Result<Option<Coupon>, StoreError> {
        let row = CouponRepo::find_recent_claim(&self.pool, identity, window_start)
            .await
            .map_err(into_store_error)?;
        Ok(row.map(Coupon::from))
    }

    async fn claim_one_unclaimed(
        &self,
        identity: &str,
        now: Timestamp,
    ) -> Result<Option<Coupon>, StoreError> {
        let row = CouponRepo::claim_one_unclaimed(&self.pool, identity, now)
            .await
            .map_err(into_store_error)?;
        Ok(row.map(Coupon::from))
    }
}

/// Map a driver error into the domain's store error, logging the detail
/// here so callers only ever see a sanitized message.
fn into_store_error(err: sqlx::Error) -> StoreError {
    tracing::error!(error = %err, "Coupon store query failed");
    StoreError::Unavailable(err.to_string())
}
