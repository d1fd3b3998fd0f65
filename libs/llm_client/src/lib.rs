//! Minimal non-streaming chat-completion client.
//!
//! Two wire formats are supported: the Ollama `/api/chat` endpoint used by a
//! local inference server, and the OpenAI-compatible `/v1/chat/completions`
//! endpoint offered by most hosted providers.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Inference endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Ollama,
    OpenAi,
}

impl FromStr for Provider {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Provider::Ollama),
            "openai" => Ok(Provider::OpenAi),
            other => Err(LlmError::Config(format!("unknown LLM provider `{}`", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Case-insensitive role name, `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "system" => Some(Role::System),
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: Provider,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    provider: Provider,
    endpoint: Url,
    model: String,
    api_key: Option<String>,
    temperature: f32,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| LlmError::Config(format!("invalid base url: {}", e)))?;
        let endpoint = endpoint_for(&base, config.provider)?;
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            provider: config.provider,
            endpoint,
            model: config.model,
            api_key: config.api_key,
            temperature: config.temperature,
        })
    }

    /// Sends the conversation and returns the first reply's text.
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let payload = request_body(self.provider, &self.model, messages, self.temperature);

        let mut request = self.http.post(self.endpoint.clone()).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        tracing::debug!(endpoint = %self.endpoint, model = %self.model, turns = messages.len(), "sending chat request");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status: status.as_u16(), body });
        }

        let body: Value = response.json().await?;
        extract_reply(self.provider, &body)
    }
}

fn endpoint_for(base: &Url, provider: Provider) -> Result<Url, LlmError> {
    let path = match provider {
        Provider::Ollama => "api/chat",
        Provider::OpenAi => "v1/chat/completions",
    };
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path)
        .map_err(|e| LlmError::Config(format!("invalid endpoint: {}", e)))
}

fn request_body(provider: Provider, model: &str, messages: &[ChatMessage], temperature: f32) -> Value {
    match provider {
        Provider::Ollama => json!({
            "model": model,
            "messages": messages,
            "stream": false,
            "options": { "temperature": temperature },
        }),
        Provider::OpenAi => json!({
            "model": model,
            "messages": messages,
            "stream": false,
            "temperature": temperature,
        }),
    }
}

fn extract_reply(provider: Provider, body: &Value) -> Result<String, LlmError> {
    let content = match provider {
        Provider::Ollama => body.pointer("/message/content"),
        Provider::OpenAi => body.pointer("/choices/0/message/content"),
    };

    content
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| LlmError::Malformed(format!("no reply content in {}", body)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_names_are_case_insensitive() {
        assert_eq!("Ollama".parse::<Provider>().unwrap(), Provider::Ollama);
        assert_eq!("openai".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert!("bard".parse::<Provider>().is_err());
    }

    #[test]
    fn role_names_parse_loosely() {
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse(" Assistant "), Some(Role::Assistant));
        assert_eq!(Role::parse("SYSTEM"), Some(Role::System));
        assert_eq!(Role::parse("tool"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn endpoints_keep_base_path() {
        let base = Url::parse("http://127.0.0.1:11434").unwrap();
        assert_eq!(
            endpoint_for(&base, Provider::Ollama).unwrap().as_str(),
            "http://127.0.0.1:11434/api/chat"
        );

        let proxied = Url::parse("https://llm.example.com/proxy").unwrap();
        assert_eq!(
            endpoint_for(&proxied, Provider::OpenAi).unwrap().as_str(),
            "https://llm.example.com/proxy/v1/chat/completions"
        );
    }

    #[test]
    fn ollama_body_disables_streaming_and_sets_temperature() {
        let body = request_body(
            Provider::Ollama,
            "llama3:8b",
            &[ChatMessage::system("be brief"), ChatMessage::user("hi")],
            0.2,
        );

        assert_eq!(body["stream"], json!(false));
        assert_eq!(body["model"], json!("llama3:8b"));
        assert_eq!(body["messages"][0]["role"], json!("system"));
        assert_eq!(body["messages"][1]["content"], json!("hi"));
        assert!((body["options"]["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn replies_are_read_per_provider() {
        let ollama = json!({ "message": { "role": "assistant", "content": "Spent 4,200" } });
        assert_eq!(extract_reply(Provider::Ollama, &ollama).unwrap(), "Spent 4,200");

        let openai = json!({ "choices": [{ "message": { "role": "assistant", "content": "ok" } }] });
        assert_eq!(extract_reply(Provider::OpenAi, &openai).unwrap(), "ok");
    }

    #[test]
    fn missing_content_is_malformed() {
        let body = json!({ "error": "model not found" });
        assert!(matches!(
            extract_reply(Provider::Ollama, &body),
            Err(LlmError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_http_error() {
        let client = LlmClient::new(LlmConfig {
            provider: Provider::Ollama,
            base_url: "http://127.0.0.1:9".to_string(),
            model: "llama3:8b".to_string(),
            api_key: None,
            temperature: 0.2,
            timeout: Duration::from_secs(2),
        })
        .unwrap();

        let result = client.chat(&[ChatMessage::user("hello")]).await;
        assert!(matches!(result, Err(LlmError::Http(_))));
    }
}
