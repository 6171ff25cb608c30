//! Request extractors.
//!
//! - [`identity::ClientIdentity`] -- Resolves the caller's identity
//!   signal (returning-client cookie plus network origin).

pub mod identity;
