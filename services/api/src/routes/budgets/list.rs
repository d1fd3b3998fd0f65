use axum::Json;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::models::Budget;
use postgres_models::schema::budgets;

use crate::{
    errors::AppResult,
    extractors::{AuthUser, DatabaseConnection},
};

pub async fn handler(
    AuthUser(user_id): AuthUser,
    DatabaseConnection(mut conn): DatabaseConnection,
) -> AppResult<Json<Vec<Budget>>> {
    let rows = budgets::table
        .filter(budgets::user_id.eq(user_id))
        .select(Budget::as_select())
        .order(budgets::created_at.desc())
        .load(&mut conn)
        .await?;

    tracing::debug!(user_id, count = rows.len(), "listed budgets");
    Ok(Json(rows))
}
