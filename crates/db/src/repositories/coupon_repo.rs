//! Repository for the `coupons` table.

use sqlx::PgPool;

use claimdrop_core::types::Timestamp;

use crate::models::coupon::CouponRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, claimed_by, claimed_at, created_at";

/// Provides claim operations for coupons.
pub struct CouponRepo;

impl CouponRepo {
    /// Find any coupon claimed by `identity` after `window_start`.
    ///
    /// Existence check for cooldown enforcement; no ordering guarantee.
    pub async fn find_recent_claim(
        pool: &PgPool,
        identity: &str,
        window_start: Timestamp,
    ) -> Result<Option<CouponRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM coupons
             WHERE claimed_by = $1 AND claimed_at > $2
             LIMIT 1"
        );
        sqlx::query_as::<_, CouponRow>(&query)
            .bind(identity)
            .bind(window_start)
            .fetch_optional(pool)
            .await
    }

    /// Atomically claim one unclaimed coupon for `identity`.
    ///
    /// Selection and update are a single statement, so two concurrent
    /// callers can never be assigned the same row. `FOR UPDATE SKIP
    /// LOCKED` makes a racing claim move on to the next unclaimed row
    /// instead of blocking behind an uncommitted one.
    ///
    /// Returns `None` when no unclaimed coupon exists at the instant of
    /// the attempt.
    pub async fn claim_one_unclaimed(
        pool: &PgPool,
        identity: &str,
        now: Timestamp,
    ) -> Result<Option<CouponRow>, sqlx::Error> {
        let query = format!(
            "UPDATE coupons
             SET claimed_by = $1, claimed_at = $2
             WHERE id = (
                 SELECT id FROM coupons
                 WHERE claimed_by IS NULL
                 ORDER BY id
                 LIMIT 1
                 FOR UPDATE SKIP LOCKED
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CouponRow>(&query)
            .bind(identity)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Insert an unclaimed coupon, returning the created row.
    ///
    /// Pool seeding happens out-of-band in production; this exists for
    /// imports and tests.
    pub async fn insert_unclaimed(pool: &PgPool, code: &str) -> Result<CouponRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO coupons (code)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CouponRow>(&query)
            .bind(code)
            .fetch_one(pool)
            .await
    }

    /// Count coupons still in the unclaimed pool.
    pub async fn unclaimed_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM coupons WHERE claimed_by IS NULL")
            .fetch_one(pool)
            .await
    }
}
