use axum::{http::StatusCode, Json};
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};
use postgres_models::models::{MovementKind, NewPotMovement, Pot, PotMovement};
use postgres_models::schema::{pot_movements, pots};
use scoped_futures::ScopedFutureExt;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    extractors::{AppJson, AuthUser, DatabaseConnection},
    routes::validation::positive,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMovementRequest {
    pub pot_id: i32,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub amount: f64,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MovementResponse {
    pub movement: PotMovement,
    pub pot: Pot,
}

/// Deposit into or withdraw from a pot.
///
/// The ledger row and the balance change commit together. The pot row stays
/// locked until commit, so concurrent movements on one pot apply in turn.
pub async fn handler(
    AuthUser(user_id): AuthUser,
    DatabaseConnection(mut conn): DatabaseConnection,
    AppJson(request): AppJson<CreateMovementRequest>,
) -> AppResult<(StatusCode, Json<MovementResponse>)> {
    let amount = positive("amount", request.amount)?;
    let new_movement = NewPotMovement {
        user_id,
        pot_id: request.pot_id,
        type_: request.kind.as_str().to_string(),
        amount,
        note: request.note,
    };
    let delta = request.kind.signed(amount);

    let response = conn
        .transaction::<_, AppError, _>(move |conn| {
            async move {
                let pot_id: i32 = pots::table
                    .filter(pots::id.eq(new_movement.pot_id))
                    .filter(pots::user_id.eq(user_id))
                    .select(pots::id)
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?
                    .ok_or_else(|| AppError::not_found("Pot not found"))?;

                let movement = diesel::insert_into(pot_movements::table)
                    .values(&new_movement)
                    .returning(PotMovement::as_returning())
                    .get_result(conn)
                    .await?;

                let pot = diesel::update(pots::table.find(pot_id))
                    .set(pots::current.eq(pots::current + delta))
                    .returning(Pot::as_returning())
                    .get_result(conn)
                    .await?;

                Ok(MovementResponse { movement, pot })
            }
            .scope_boxed()
        })
        .await?;

    tracing::info!(
        user_id,
        pot_id = response.pot.id,
        kind = request.kind.as_str(),
        amount,
        "pot movement recorded"
    );
    Ok((StatusCode::CREATED, Json(response)))
}
