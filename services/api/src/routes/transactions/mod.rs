use axum::{routing::get, Router};

use crate::state::AppState;

mod create;
mod delete;
mod list;
mod show;
mod update;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::handler).post(create::handler))
        .route(
            "/:id",
            get(show::handler).put(update::handler).delete(delete::handler),
        )
}
