use axum::Json;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::schema::budgets;

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
    let deleted = diesel::delete(
        budgets::table
            .filter(budgets::id.eq(id))
            .filter(budgets::user_id.eq(user_id)),
    )
    .execute(&mut conn)
    .await?;

    if deleted == 0 {
        return Err(AppError::not_found("Budget not found"));
    }

    Ok(Json(MessageResponse::new("Budget deleted")))
}
