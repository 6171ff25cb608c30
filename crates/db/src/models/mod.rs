//! Database row types, mapped into domain entities at the crate boundary.

pub mod coupon;

pub use coupon::CouponRow;
