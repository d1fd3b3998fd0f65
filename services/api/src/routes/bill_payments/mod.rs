use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

mod list;
mod mark_paid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::handler))
        .route("/mark-paid", post(mark_paid::handler))
}
