use axum::{extract::State, http::StatusCode, Json};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::models::{NewUser, UserProfile};
use postgres_models::schema::users;
use serde::{Deserialize, Serialize};

use super::{normalize_email, AuthResponse};
use crate::{
    auth::{hash_password, is_strong_password},
    errors::{AppError, AppResult},
    extractors::{AppJson, DatabaseConnection},
    routes::validation::required_text,
    state::AppState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub password: String,
}

/// Register a user and issue their first token.
pub async fn handler(
    State(state): State<AppState>,
    DatabaseConnection(mut conn): DatabaseConnection,
    AppJson(request): AppJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let name = required_text("name", &request.name)?;
    let email = normalize_email(&request.email).ok_or_else(|| AppError::bad_request("Missing fields"))?;
    if !is_strong_password(&request.password) {
        return Err(AppError::bad_request("Weak password (not meeting rules)"));
    }

    let existing: Option<i32> = users::table
        .filter(users::email.eq(&email))
        .select(users::id)
        .first(&mut conn)
        .await
        .optional()?;
    if existing.is_some() {
        return Err(AppError::conflict("User already exists"));
    }

    let new_user = NewUser {
        name,
        email,
        phone: request.phone.filter(|p| !p.trim().is_empty()),
        password_hash: hash_password(&request.password)?,
    };

    let user: UserProfile = diesel::insert_into(users::table)
        .values(&new_user)
        .returning(UserProfile::as_returning())
        .get_result(&mut conn)
        .await?;

    let token = state.tokens.issue(user.id)?;
    tracing::info!(user_id = user.id, "user signed up");

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}
