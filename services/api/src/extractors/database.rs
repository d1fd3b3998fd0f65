use crate::state::AppState;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use postgres_models::DbConnection;

use crate::errors::AppError;

/// A pooled connection held for the lifetime of one request.
pub struct DatabaseConnection(pub DbConnection);

impl DatabaseConnection {
    /// Checks a connection out of the pool outside of extraction, for handlers
    /// that validate their input first.
    pub async fn acquire(state: &AppState) -> Result<Self, AppError> {
        let conn = state.db_pool.get_owned().await.map_err(|e| {
            tracing::error!("failed to acquire database connection: {}", e);
            AppError::service_unavailable("Database unavailable")
        })?;

        Ok(DatabaseConnection(conn))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for DatabaseConnection
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Self::acquire(&AppState::from_ref(state)).await
    }
}
