use axum::{http::StatusCode, Json};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::models::{NewPot, Pot};
use postgres_models::schema::pots;
use serde::{Deserialize, Serialize};

use crate::{
    errors::AppResult,
    extractors::{AppJson, AuthUser, DatabaseConnection},
    routes::validation::{non_negative, required_text},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePotRequest {
    pub name: String,
    pub target: f64,
    /// Opening balance.
    #[serde(default)]
    pub current: f64,
}

pub async fn handler(
    AuthUser(user_id): AuthUser,
    DatabaseConnection(mut conn): DatabaseConnection,
    AppJson(request): AppJson<CreatePotRequest>,
) -> AppResult<(StatusCode, Json<Pot>)> {
    let new_pot = NewPot {
        user_id,
        name: required_text("name", &request.name)?,
        target: non_negative("target", request.target)?,
        current: non_negative("current", request.current)?,
    };

    let row = diesel::insert_into(pots::table)
        .values(&new_pot)
        .returning(Pot::as_returning())
        .get_result(&mut conn)
        .await?;

    tracing::info!(user_id, pot_id = row.id, "pot created");
    Ok((StatusCode::CREATED, Json(row)))
}
