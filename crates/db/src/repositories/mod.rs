//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod coupon_repo;

pub use coupon_repo::CouponRepo;
