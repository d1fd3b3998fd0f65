use axum::Json;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::models::{UserChanges, UserProfile};
use postgres_models::schema::users;
use serde::{Deserialize, Serialize};

use super::UserResponse;
use crate::{
    auth::{hash_password, is_strong_password},
    errors::{AppError, AppResult},
    extractors::{AppJson, AuthUser, DatabaseConnection},
    routes::validation::optional_text,
};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Update name, phone, avatar and optionally the password. Omitted fields
/// keep their current value.
pub async fn handler(
    AuthUser(user_id): AuthUser,
    DatabaseConnection(mut conn): DatabaseConnection,
    AppJson(request): AppJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let password_hash = match request.password.filter(|p| !p.is_empty()) {
        Some(password) if !is_strong_password(&password) => {
            return Err(AppError::bad_request("Weak password (not meeting rules)"));
        }
        Some(password) => Some(hash_password(&password)?),
        None => None,
    };

    let changes = UserChanges {
        name: optional_text("name", request.name)?,
        phone: request.phone,
        avatar: request.avatar,
        password_hash,
    };

    let user = if changes.is_empty() {
        users::table
            .find(user_id)
            .select(UserProfile::as_select())
            .first(&mut conn)
            .await
            .optional()?
    } else {
        diesel::update(users::table.find(user_id))
            .set(&changes)
            .returning(UserProfile::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?
    };

    let user = user.ok_or_else(|| AppError::not_found("User not found"))?;
    tracing::info!(user_id, "profile updated");
    Ok(Json(UserResponse { user }))
}
