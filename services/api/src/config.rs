use anyhow::{anyhow, Context, Result};
use chrono::FixedOffset;
use llm_client::{LlmConfig, Provider};
use std::env;
use std::time::Duration;
use url::Url;

const DEFAULT_LLM_BASE_URL: &str = "http://127.0.0.1:11434";
const DEFAULT_LLM_MODEL: &str = "llama3:8b";
const LLM_TEMPERATURE: f32 = 0.2;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub llm: LlmConfig,
    pub local_offset: FixedOffset,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns `None` for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => database_url_from_parts(
                &var("PG_HOST", "localhost"),
                &var("PG_PORT", "5432"),
                &var("PG_USER", "postgres"),
                &var("PG_PASSWORD", ""),
                &var("PG_DB", "wealthwave"),
            )?,
        };

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("JWT_SECRET must be set"))?;

        let provider: Provider = var("LLM_PROVIDER", "ollama").parse()?;
        let base_url = lookup("LLM_BASE_URL")
            .or_else(|| lookup("OLLAMA_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string());
        let timeout_secs: u64 = var("LLM_TIMEOUT_SECS", "120")
            .parse()
            .context("LLM_TIMEOUT_SECS must be a number of seconds")?;

        let offset_minutes: i32 = var("LOCAL_UTC_OFFSET_MINUTES", "330")
            .parse()
            .context("LOCAL_UTC_OFFSET_MINUTES must be an integer")?;
        let local_offset = FixedOffset::east_opt(offset_minutes * 60)
            .ok_or_else(|| anyhow!("LOCAL_UTC_OFFSET_MINUTES out of range"))?;

        Ok(Self {
            port: var("PORT", "8080").parse().context("PORT must be a port number")?,
            database_url,
            jwt_secret,
            llm: LlmConfig {
                provider,
                base_url,
                model: var("LOCAL_LLM_MODEL", DEFAULT_LLM_MODEL),
                api_key: lookup("LLM_API_KEY").filter(|k| !k.is_empty()),
                temperature: LLM_TEMPERATURE,
                timeout: Duration::from_secs(timeout_secs),
            },
            local_offset,
            environment: var("ENVIRONMENT", "development"),
        })
    }
}

fn database_url_from_parts(host: &str, port: &str, user: &str, password: &str, db: &str) -> Result<String> {
    let mut url = Url::parse("postgres://localhost").context("base database url")?;
    url.set_host(Some(host)).context("PG_HOST is not a valid host")?;
    let port: u16 = port.parse().context("PG_PORT must be a port number")?;
    url.set_port(Some(port)).map_err(|_| anyhow!("PG_PORT cannot be set"))?;
    url.set_username(user).map_err(|_| anyhow!("PG_USER cannot be set"))?;
    if !password.is_empty() {
        url.set_password(Some(password)).map_err(|_| anyhow!("PG_PASSWORD cannot be set"))?;
    }
    url.set_path(db);
    Ok(url.to_string())
}
