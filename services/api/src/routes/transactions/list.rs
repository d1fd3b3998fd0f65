use axum::Json;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::models::Transaction;
use postgres_models::schema::transactions;

use crate::{
    errors::AppResult,
    extractors::{AuthUser, DatabaseConnection},
};

pub async fn handler(
    AuthUser(user_id): AuthUser,
    DatabaseConnection(mut conn): DatabaseConnection,
) -> AppResult<Json<Vec<Transaction>>> {
    let rows = transactions::table
        .filter(transactions::user_id.eq(user_id))
        .select(Transaction::as_select())
        .order((transactions::date.desc(), transactions::created_at.desc()))
        .load(&mut conn)
        .await?;

    tracing::debug!(user_id, count = rows.len(), "listed transactions");
    Ok(Json(rows))
}
