use axum::Json;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::models::Transaction;
use postgres_models::schema::transactions;

use crate::{
    errors::{AppError, AppResult},
    extractors::{AppPath, AuthUser, DatabaseConnection},
};

pub async fn handler(
    AuthUser(user_id): AuthUser,
    AppPath(id): AppPath<i32>,
    DatabaseConnection(mut conn): DatabaseConnection,
) -> AppResult<Json<Transaction>> {
    let row = transactions::table
        .filter(transactions::id.eq(id))
        .filter(transactions::user_id.eq(user_id))
        .select(Transaction::as_select())
        .first(&mut conn)
        .await
        .optional()?
        .ok_or_else(|| AppError::not_found("Transaction not found"))?;

    Ok(Json(row))
}
