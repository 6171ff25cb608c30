//! Domain layer for the claimdrop coupon allocator.
//!
//! Holds the shared types, the [`store::CouponStore`] abstraction, and the
//! [`allocator::Allocator`] that implements the claim policy. This crate
//! performs no I/O; storage backends live behind the store trait.

pub mod allocator;
pub mod coupon;
pub mod store;
pub mod types;
