use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

mod ai;
mod auth;
mod bill_payments;
mod bills;
mod budgets;
mod pot_movements;
mod pots;
mod transactions;
pub mod validation;

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "wealthwave-api"
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth::router())
        .nest("/transactions", transactions::router())
        .nest("/budgets", budgets::router())
        .nest("/pots", pots::router())
        .nest("/pot-movements", pot_movements::router())
        .nest("/bills", bills::router())
        .nest("/bill-payments", bill_payments::router())
        .nest("/ai", ai::router())
}
