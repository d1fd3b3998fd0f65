use axum::Json;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::schema::pots;

use crate::{
    errors::{AppError, AppResult},
    extractors::{AppPath, AuthUser, DatabaseConnection},
    routes::validation::MessageResponse,
};

/// Movements recorded against the pot are removed by the cascade.
pub async fn handler(
    AuthUser(user_id): AuthUser,
    AppPath(id): AppPath<i32>,
    DatabaseConnection(mut conn): DatabaseConnection,
) -> AppResult<Json<MessageResponse>> {
    let deleted = diesel::delete(pots::table.filter(pots::id.eq(id)).filter(pots::user_id.eq(user_id)))
        .execute(&mut conn)
        .await?;

    if deleted == 0 {
        return Err(AppError::not_found("Pot not found"));
    }

    tracing::info!(user_id, pot_id = id, "pot deleted");
    Ok(Json(MessageResponse::new("Pot deleted")))
}
