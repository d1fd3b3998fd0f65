use axum::{extract::State, Json};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::models::User;
use postgres_models::schema::users;
use serde::{Deserialize, Serialize};

use super::{normalize_email, AuthResponse};
use crate::{
    auth::verify_password,
    errors::{AppError, AppResult},
    extractors::{AppJson, DatabaseConnection},
    state::AppState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn handler(
    State(state): State<AppState>,
    DatabaseConnection(mut conn): DatabaseConnection,
    AppJson(request): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid = || AppError::unauthorized("Invalid credentials");
    let email = normalize_email(&request.email).ok_or_else(invalid)?;

    let user: User = users::table
        .filter(users::email.eq(&email))
        .select(User::as_select())
        .first(&mut conn)
        .await
        .optional()?
        .ok_or_else(invalid)?;

    if !verify_password(&request.password, &user.password_hash) {
        tracing::warn!(user_id = user.id, "login with wrong password");
        return Err(invalid());
    }

    let token = state.tokens.issue(user.id)?;
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}
