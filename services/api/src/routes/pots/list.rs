use axum::Json;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::models::Pot;
use postgres_models::schema::pots;

use crate::{
    errors::AppResult,
    extractors::{AuthUser, DatabaseConnection},
};

pub async fn handler(
    AuthUser(user_id): AuthUser,
    DatabaseConnection(mut conn): DatabaseConnection,
) -> AppResult<Json<Vec<Pot>>> {
    let rows = pots::table
        .filter(pots::user_id.eq(user_id))
        .select(Pot::as_select())
        .order(pots::created_at.desc())
        .load(&mut conn)
        .await?;

    tracing::debug!(user_id, count = rows.len(), "listed pots");
    Ok(Json(rows))
}
