use axum::{routing::post, Router};

use crate::state::AppState;

mod finance_chat;

pub fn router() -> Router<AppState> {
    Router::new().route("/finance-chat", post(finance_chat::handler))
}
