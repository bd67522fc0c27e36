//! Shared application state for all routes.

use crate::auth::CredentialVerifier;
use crate::config::ResolvedModel;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// Resolved once at startup; the catalog does not change at runtime.
    pub model: Arc<ResolvedModel>,
    pub credentials: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(pool: SqlitePool, model: ResolvedModel, credentials: Arc<dyn CredentialVerifier>) -> Self {
        AppState {
            pool,
            model: Arc::new(model),
            credentials,
        }
    }
}
