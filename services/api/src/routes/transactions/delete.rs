use axum::Json;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::schema::transactions;

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
        transactions::table
            .filter(transactions::id.eq(id))
            .filter(transactions::user_id.eq(user_id)),
    )
    .execute(&mut conn)
    .await?;

    if deleted == 0 {
        return Err(AppError::not_found("Transaction not found"));
    }

    tracing::info!(user_id, transaction_id = id, "transaction deleted");
    Ok(Json(MessageResponse::new("Transaction deleted")))
}
