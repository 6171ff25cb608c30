use std::sync::Arc;

use claimdrop_core::allocator::Allocator;
use claimdrop_db::store::PgCouponStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: claimdrop_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The claim allocator over the Postgres-backed coupon store.
    pub allocator: Arc<Allocator<PgCouponStore>>,
}

impl AppState {
    /// Build state from a pool and config, wiring the allocator to the
    /// Postgres store with the configured cooldown window.
    pub fn new(pool: claimdrop_db::DbPool, config: ServerConfig) -> Self {
        let allocator = Allocator::new(PgCouponStore::new(pool.clone()), config.claim_window());
        Self {
            pool,
            config: Arc::new(config),
            allocator: Arc::new(allocator),
        }
    }
}
