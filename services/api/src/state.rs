use chrono::FixedOffset;
use llm_client::LlmClient;
use postgres_models::DbPool;

use crate::auth::TokenKeys;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: DbPool,
    pub tokens: TokenKeys,
    pub llm: LlmClient,
    pub local_offset: FixedOffset,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = postgres_models::create_pool(&config.database_url)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create database pool: {}", e))?;
        postgres_models::init_schema(&db_pool)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to initialise schema: {}", e))?;

        Self::with_pool(db_pool, config)
    }

    /// Assembles state around an existing pool without touching the database.
    pub fn with_pool(db_pool: DbPool, config: &Config) -> anyhow::Result<Self> {
        let llm = LlmClient::new(config.llm.clone())
            .map_err(|e| anyhow::anyhow!("Failed to create LLM client: {}", e))?;

        Ok(Self {
            db_pool,
            tokens: TokenKeys::from_secret(config.jwt_secret.as_bytes()),
            llm,
            local_offset: config.local_offset,
        })
    }
}
