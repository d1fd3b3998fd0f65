use axum::Json;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::models::PotMovement;
use postgres_models::schema::pot_movements;
use serde::Deserialize;

use crate::{
    errors::AppResult,
    extractors::{AppQuery, AuthUser, DatabaseConnection},
};

#[derive(Debug, Default, Deserialize)]
pub struct MovementFilter {
    pub pot_id: Option<i32>,
}

/// The caller's pot ledger, newest first, optionally for a single pot.
pub async fn handler(
    AuthUser(user_id): AuthUser,
    AppQuery(filter): AppQuery<MovementFilter>,
    DatabaseConnection(mut conn): DatabaseConnection,
) -> AppResult<Json<Vec<PotMovement>>> {
    let mut query = pot_movements::table
        .filter(pot_movements::user_id.eq(user_id))
        .select(PotMovement::as_select())
        .order((pot_movements::date.desc(), pot_movements::id.desc()))
        .into_boxed();

    if let Some(pot_id) = filter.pot_id {
        query = query.filter(pot_movements::pot_id.eq(pot_id));
    }

    let rows = query.load(&mut conn).await?;

    tracing::debug!(user_id, pot_id = ?filter.pot_id, count = rows.len(), "listed pot movements");
    Ok(Json(rows))
}
