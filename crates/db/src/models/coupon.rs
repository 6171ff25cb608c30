//! Row type for the `coupons` table.

use sqlx::FromRow;

use claimdrop_core::coupon::Coupon;
use claimdrop_core::types::{DbId, Timestamp};

/// A row from the `coupons` table.
#[derive(Debug, Clone, FromRow)]
pub struct CouponRow {
    pub id: DbId,
    pub code: String,
    pub claimed_by: Option<String>,
    pub claimed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<CouponRow> for Coupon {
    fn from(row: CouponRow) -> Self {
        Coupon {
            id: row.id,
            code: row.code,
            claimed_by: row.claimed_by,
            claimed_at: row.claimed_at,
        }
    }
}
