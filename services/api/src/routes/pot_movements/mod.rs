use axum::{routing::get, Router};

use crate::state::AppState;

mod create;
mod list;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list::handler).post(create::handler))
}
