//! Integration tests for the coupon repository against a real database.
//!
//! Exercises the correctness-critical pieces:
//! - Atomic claim: no two claimants ever receive the same coupon.
//! - Cooldown recency lookup, including the exact window boundary.
//! - Exhaustion when the pool is empty.
//! - The schema-level both-or-neither claim invariant.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use claimdrop_db::repositories::CouponRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_codes(pool: &PgPool, codes: &[&str]) {
    for code in codes {
        CouponRepo::insert_unclaimed(pool, code)
            .await
            .expect("Failed to seed coupon");
    }
}

// ---------------------------------------------------------------------------
// Test: claiming assigns both identity and timestamp
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn claim_sets_identity_and_timestamp(pool: PgPool) {
    seed_codes(&pool, &["SAVE10"]).await;
    let now = Utc::now();

    let claimed = CouponRepo::claim_one_unclaimed(&pool, "203.0.113.7", now)
        .await
        .unwrap()
        .expect("Pool should not be exhausted");

    assert_eq!(claimed.code, "SAVE10");
    assert_eq!(claimed.claimed_by.as_deref(), Some("203.0.113.7"));

    // Postgres stores microseconds; compare with a small tolerance.
    let claimed_at = claimed.claimed_at.expect("claimed_at must be set");
    assert!((claimed_at - now).num_milliseconds().abs() <= 1);
    assert_eq!(CouponRepo::unclaimed_count(&pool).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Test: empty pool yields None, and nothing is mutated
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn claim_on_empty_pool_returns_none(pool: PgPool) {
    let result = CouponRepo::claim_one_unclaimed(&pool, "203.0.113.7", Utc::now())
        .await
        .unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
async fn claim_on_fully_claimed_pool_returns_none(pool: PgPool) {
    seed_codes(&pool, &["A"]).await;
    let now = Utc::now();

    CouponRepo::claim_one_unclaimed(&pool, "x", now)
        .await
        .unwrap()
        .expect("First claim should succeed");
    let second = CouponRepo::claim_one_unclaimed(&pool, "y", now).await.unwrap();

    assert!(second.is_none());

    // The already-claimed row was not reassigned.
    let recent = CouponRepo::find_recent_claim(&pool, "x", now - Duration::hours(1))
        .await
        .unwrap()
        .expect("Original claim should still stand");
    assert_eq!(recent.claimed_by.as_deref(), Some("x"));
}

// ---------------------------------------------------------------------------
// Test: concurrent claims never hand out the same coupon
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn concurrent_claims_receive_distinct_coupons(pool: PgPool) {
    seed_codes(&pool, &["C1", "C2", "C3", "C4"]).await;
    let now = Utc::now();

    // 8 claimants race for 4 coupons over the shared pool.
    let mut handles = Vec::new();
    for i in 0..8 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            CouponRepo::claim_one_unclaimed(&pool, &format!("198.51.100.{i}"), now).await
        }));
    }

    let mut codes = Vec::new();
    let mut exhausted = 0;
    for handle in handles {
        match handle.await.unwrap().unwrap() {
            Some(row) => codes.push(row.code),
            None => exhausted += 1,
        }
    }

    assert_eq!(codes.len(), 4, "Exactly one winner per coupon");
    assert_eq!(exhausted, 4);
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), 4, "No coupon was assigned twice");
}

// ---------------------------------------------------------------------------
// Test: recency lookup honours the window boundary
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn find_recent_claim_window_boundaries(pool: PgPool) {
    seed_codes(&pool, &["A"]).await;
    let claimed_at = Utc::now();

    CouponRepo::claim_one_unclaimed(&pool, "203.0.113.7", claimed_at)
        .await
        .unwrap()
        .expect("Claim should succeed");

    // Inside the window: found.
    let inside = CouponRepo::find_recent_claim(
        &pool,
        "203.0.113.7",
        claimed_at - Duration::minutes(59),
    )
    .await
    .unwrap();
    assert!(inside.is_some());

    // Exactly at the boundary the claim no longer counts as recent.
    let at_boundary = CouponRepo::find_recent_claim(&pool, "203.0.113.7", claimed_at)
        .await
        .unwrap();
    assert!(at_boundary.is_none());

    // A different identity never matches.
    let other = CouponRepo::find_recent_claim(
        &pool,
        "203.0.113.8",
        claimed_at - Duration::hours(1),
    )
    .await
    .unwrap();
    assert!(other.is_none());
}

// ---------------------------------------------------------------------------
// Test: schema rejects partial claim states
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn check_constraint_rejects_partial_claims(pool: PgPool) {
    let by_only = sqlx::query("INSERT INTO coupons (code, claimed_by) VALUES ('P1', 'someone')")
        .execute(&pool)
        .await;
    assert!(by_only.is_err(), "claimed_by without claimed_at must be rejected");

    let at_only = sqlx::query("INSERT INTO coupons (code, claimed_at) VALUES ('P2', NOW())")
        .execute(&pool)
        .await;
    assert!(at_only.is_err(), "claimed_at without claimed_by must be rejected");
}

// ---------------------------------------------------------------------------
// Test: duplicate codes violate the unique constraint
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn duplicate_code_rejected(pool: PgPool) {
    seed_codes(&pool, &["DUP"]).await;

    let dup = CouponRepo::insert_unclaimed(&pool, "DUP").await;
    assert!(dup.is_err());
}
