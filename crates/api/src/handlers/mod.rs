//! Request handlers.
//!
//! Handlers delegate to the allocator in `claimdrop_core` and map errors
//! via [`AppError`](crate::error::AppError).

pub mod claim;
