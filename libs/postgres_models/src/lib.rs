pub mod models;
pub mod schema;

use bb8::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{AsyncPgConnection, SimpleAsyncConnection};
use std::time::Duration;

pub type DbPool = Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;
pub type DbConnection = bb8::PooledConnection<'static, AsyncDieselConnectionManager<AsyncPgConnection>>;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database pool error: {0}")]
    Pool(#[from] bb8::RunError<diesel_async::pooled_connection::PoolError>),

    #[error("Database query error: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("Connection error: {0}")]
    Connection(String),
}

fn manager(database_url: &str) -> AsyncDieselConnectionManager<AsyncPgConnection> {
    AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url)
}

pub async fn create_pool(database_url: &str) -> Result<DbPool, DbError> {
    Pool::builder()
        .max_size(20)
        .min_idle(Some(5))
        .connection_timeout(Duration::from_secs(30))
        .idle_timeout(Some(Duration::from_secs(600)))
        .test_on_check_out(true)
        .build(manager(database_url))
        .await
        .map_err(|e| DbError::Connection(e.to_string()))
}

/// Builds a pool that opens no connection until one is requested.
pub fn create_lazy_pool(database_url: &str) -> DbPool {
    Pool::builder()
        .max_size(20)
        .connection_timeout(Duration::from_secs(30))
        .build_unchecked(manager(database_url))
}

/// Creates any missing tables and indexes.
pub async fn init_schema(pool: &DbPool) -> Result<(), DbError> {
    let mut conn = pool.get().await?;
    conn.batch_execute(include_str!("init.sql")).await?;
    tracing::info!("database schema ready");
    Ok(())
}
