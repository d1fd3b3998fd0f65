use axum::Json;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::schema::bills;

use crate::{
    errors::{AppError, AppResult},
    extractors::{AppPath, AuthUser, DatabaseConnection},
    routes::validation::MessageResponse,
};

pub async fn handler(
    AuthUser(user_id): AuthUser,
    AppPath(id): AppPath<i32>,
    DatabaseConnection(mut conn): DatabaseConnection,
) -> AppResult<Json<MessageResponse>> {
    let deleted = diesel::delete(bills::table.filter(bills::id.eq(id)).filter(bills::user_id.eq(user_id)))
        .execute(&mut conn)
        .await?;

    if deleted == 0 {
        return Err(AppError::not_found("Bill not found"));
    }

    Ok(Json(MessageResponse::new("Bill deleted")))
}
