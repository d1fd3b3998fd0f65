#![allow(dead_code)]

use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time::sleep;

use wealthwave_api::{AppState, Config};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const STRONG_PASSWORD: &str = "Str0ng!Pass";

pub fn api_base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
}

/// Configuration for in-process router tests. Nothing here is ever dialled.
pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://postgres@127.0.0.1:1/wealthwave_test".to_string()),
        "JWT_SECRET" => Some("router-test-secret".to_string()),
        "OLLAMA_BASE_URL" => Some("http://127.0.0.1:9".to_string()),
        _ => None,
    })
    .expect("test config")
}

/// State around a pool that never connects, for exercising the request
/// pipeline up to the point a connection would be taken.
pub fn offline_state() -> AppState {
    let config = test_config();
    let pool = postgres_models::create_lazy_pool(&config.database_url);
    AppState::with_pool(pool, &config).expect("offline state")
}

/// Unique email per call so end-to-end runs never collide.
pub fn unique_email(prefix: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}_{}_{}@example.test", prefix, nanos, n)
}

/// HTTP client for a running server.
pub struct TestClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl TestClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: api_base_url(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Result<Response> {
        self.authorize(self.client.get(self.url(path))).send().await
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Result<Response> {
        self.authorize(self.client.post(self.url(path))).json(body).send().await
    }

    pub async fn put(&self, path: &str, body: &Value) -> reqwest::Result<Response> {
        self.authorize(self.client.put(self.url(path))).json(body).send().await
    }

    pub async fn delete(&self, path: &str) -> reqwest::Result<Response> {
        self.authorize(self.client.delete(self.url(path))).send().await
    }

    pub async fn signup(&self, email: &str, password: &str) -> reqwest::Result<Response> {
        self.post(
            "/auth/signup",
            &json!({
                "name": "Test User",
                "email": email,
                "phone": "9999999999",
                "password": password,
            }),
        )
        .await
    }

    /// Signs up a fresh user and returns a client carrying their token.
    pub async fn signed_up_user() -> (TestClient, Value) {
        let client = TestClient::new();
        let response = client
            .signup(&unique_email("user"), STRONG_PASSWORD)
            .await
            .expect("Failed to send request");
        let body = expect_status(response, StatusCode::CREATED).await;
        let token = body["token"].as_str().expect("Missing token").to_string();
        (client.with_token(token), body["user"].clone())
    }
}

/// Asserts the status and returns the JSON body.
pub async fn expect_status(response: Response, expected: StatusCode) -> Value {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    assert_eq!(status, expected, "Expected {}, got {}: {}", expected, status, text);
    serde_json::from_str(&text).unwrap_or(Value::Null)
}

pub struct TestEnvironment;

impl TestEnvironment {
    pub async fn check_api_server() -> bool {
        match Client::new().get(format!("{}/api/health", api_base_url())).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    pub async fn wait_for_api_server(timeout_seconds: u64) -> bool {
        let start = std::time::Instant::now();
        while start.elapsed() < Duration::from_secs(timeout_seconds) {
            if Self::check_api_server().await {
                return true;
            }
            sleep(Duration::from_millis(500)).await;
        }
        false
    }

    pub async fn validate_test_environment() {
        assert!(
            Self::wait_for_api_server(30).await,
            "API server is not running on {}. Start it with: cargo run --bin api",
            api_base_url()
        );
    }
}
