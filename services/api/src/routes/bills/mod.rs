use axum::{
    routing::{get, put},
    Router,
};

use crate::{errors::AppError, state::AppState};

mod create;
mod delete;
mod list;
mod update;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::handler).post(create::handler))
        .route("/:id", put(update::handler).delete(delete::handler))
}

fn due_day(value: i32) -> Result<i32, AppError> {
    if (1..=31).contains(&value) {
        Ok(value)
    } else {
        Err(AppError::bad_request("due_day must be between 1 and 31"))
    }
}

/// Category ids are serial keys; `0` or below means "no category".
fn category_ref(value: Option<i32>) -> Option<i32> {
    value.filter(|id| *id > 0)
}
