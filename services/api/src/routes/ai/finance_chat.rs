use axum::{extract::State, Json};
use chrono::Utc;
use llm_client::{ChatMessage, Role};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    errors::{AppError, AppResult},
    extractors::{AppJson, AuthUser, DatabaseConnection},
    finance::{build_context, build_messages, load_snapshot, resolve, PeriodDescriptor},
    routes::validation::required_text,
    state::AppState,
};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FinanceChatRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
    /// Parsed leniently; anything unrecognised means this month.
    #[serde(default)]
    pub period: Option<Value>,
    #[serde(default)]
    pub lang: Option<String>,
}

/// One prior turn as sent by the client. Roles are matched loosely and turns
/// with an unknown role are dropped rather than failing the request.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct HistoryTurn {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

fn history_messages(history: &[HistoryTurn]) -> Vec<ChatMessage> {
    history
        .iter()
        .filter_map(|turn| {
            let role = Role::parse(turn.role.as_deref()?)?;
            Some(ChatMessage { role, content: turn.content.clone().unwrap_or_default() })
        })
        .collect()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FinanceChatResponse {
    pub reply: String,
}

/// Answers a question about the caller's finances.
///
/// Builds a read-only summary of the caller's data for the requested period
/// and forwards it with the question to the configured model.
pub async fn handler(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(request): AppJson<FinanceChatRequest>,
) -> AppResult<Json<FinanceChatResponse>> {
    let text = required_text("text", &request.text)?;
    let DatabaseConnection(mut conn) = DatabaseConnection::acquire(&state).await?;

    let today = Utc::now().with_timezone(&state.local_offset).date_naive();
    let period = resolve(&PeriodDescriptor::from_json(request.period.as_ref()), today);
    let window = period.comparison_window(today);

    let snapshot = load_snapshot(&mut conn, user_id, period.range(), window).await?;
    // The pooled connection is not needed while waiting on the model.
    drop(conn);

    let context = build_context(period, window, snapshot);
    let context_json = serde_json::to_string(&context).map_err(|e| {
        tracing::error!("failed to encode finance context: {}", e);
        AppError::internal_server_error("AI server error")
    })?;

    let history = history_messages(&request.history);
    let messages = build_messages(&text, &history, request.lang.as_deref(), &context_json);
    let reply = state.llm.chat(&messages).await?;

    tracing::info!(user_id, period = %context.period.label, "finance chat answered");
    Ok(Json(FinanceChatResponse { reply }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_history_roles_are_skipped() {
        let request: FinanceChatRequest = serde_json::from_value(json!({
            "text": "compare my months",
            "history": [
                { "role": "user", "content": "hi" },
                { "role": "tool", "content": "ignored" },
                { "content": "no role" },
                { "role": null, "content": "null role" },
                { "role": "Assistant", "content": "hello" }
            ]
        }))
        .unwrap();

        let history = history_messages(&request.history);

        assert_eq!(
            history,
            vec![
                ChatMessage { role: Role::User, content: "hi".into() },
                ChatMessage { role: Role::Assistant, content: "hello".into() },
            ]
        );
    }

    #[test]
    fn missing_fields_default() {
        let request: FinanceChatRequest = serde_json::from_value(json!({})).unwrap();

        assert!(request.text.is_empty());
        assert!(request.history.is_empty());
        assert!(request.period.is_none());
    }
}
