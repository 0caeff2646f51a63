use std::sync::Arc;

use chrono_tz::Tz;
use moodflow_core::auth::TokenIssuer;
use moodflow_core::storage::SqliteStore;

use crate::error::{ApiError, ApiResult};

/// Shared handler state. The store serializes access through its own mutex.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SqliteStore>,
    pub tokens: Arc<TokenIssuer>,
    pub timezone: Tz,
}

impl AppState {
    pub fn new(store: SqliteStore, tokens: TokenIssuer, timezone: Tz) -> Self {
        Self {
            store: Arc::new(store),
            tokens: Arc::new(tokens),
            timezone,
        }
    }

    /// Run a store call on the blocking pool.
    pub async fn with_store<T, E, F>(&self, f: F) -> ApiResult<T>
    where
        F: FnOnce(&SqliteStore) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Into<ApiError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        blocking(move || f(&store)).await
    }
}

/// Run synchronous work (SQLite, Argon2) off the async worker threads.
pub async fn blocking<T, E, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("blocking task failed: {}", e)))?
        .map_err(Into::into)
}
