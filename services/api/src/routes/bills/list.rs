use axum::Json;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::models::Bill;
use postgres_models::schema::bills;

use crate::{
    errors::AppResult,
    extractors::{AuthUser, DatabaseConnection},
};

pub async fn handler(
    AuthUser(user_id): AuthUser,
    DatabaseConnection(mut conn): DatabaseConnection,
) -> AppResult<Json<Vec<Bill>>> {
    let rows = bills::table
        .filter(bills::user_id.eq(user_id))
        .select(Bill::as_select())
        .order(bills::created_at.desc())
        .load(&mut conn)
        .await?;

    tracing::debug!(user_id, count = rows.len(), "listed bills");
    Ok(Json(rows))
}
