//! The coupon entity.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// A promotional code from the finite pool.
///
/// Invariant: `claimed_by` and `claimed_at` are either both absent
/// (unclaimed) or both present (claimed). A coupon transitions from
/// unclaimed to claimed exactly once and never back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    pub id: DbId,
    /// Opaque redeemable string, unique across all coupons.
    pub code: String,
    /// Identity signal of the claimant, if claimed.
    pub claimed_by: Option<String>,
    /// When the coupon was claimed, if claimed.
    pub claimed_at: Option<Timestamp>,
}

impl Coupon {
    pub fn is_claimed(&self) -> bool {
        self.claimed_by.is_some()
    }
}
