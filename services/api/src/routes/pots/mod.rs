use axum::{
    routing::{get, put},
    Router,
};

use crate::state::AppState;

mod create;
mod delete;
mod list;
mod update;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::handler).post(create::handler))
        .route("/:id", put(update::handler).delete(delete::handler))
}
