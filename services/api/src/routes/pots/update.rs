use axum::Json;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::models::{Pot, PotChanges};
use postgres_models::schema::pots;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    extractors::{AppJson, AppPath, AuthUser, DatabaseConnection},
    routes::validation::{non_negative, optional_text},
};

/// Renames or retargets a pot. The balance only moves through pot movements.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdatePotRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub target: Option<f64>,
}

pub async fn handler(
    AuthUser(user_id): AuthUser,
    AppPath(id): AppPath<i32>,
    DatabaseConnection(mut conn): DatabaseConnection,
    AppJson(request): AppJson<UpdatePotRequest>,
) -> AppResult<Json<Pot>> {
    let changes = PotChanges {
        name: optional_text("name", request.name)?,
        target: request.target.map(|t| non_negative("target", t)).transpose()?,
    };
    let owned = pots::table
        .filter(pots::id.eq(id))
        .filter(pots::user_id.eq(user_id));

    let row = if changes.is_empty() {
        owned
            .select(Pot::as_select())
            .first(&mut conn)
            .await
            .optional()?
    } else {
        diesel::update(owned)
            .set(&changes)
            .returning(Pot::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?
    };

    row.map(Json).ok_or_else(|| AppError::not_found("Pot not found"))
}
