use axum::Json;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::models::UserProfile;
use postgres_models::schema::users;

use super::UserResponse;
use crate::{
    errors::{AppError, AppResult},
    extractors::{AuthUser, DatabaseConnection},
};

/// The caller's profile, used by clients to restore a session.
pub async fn handler(
    AuthUser(user_id): AuthUser,
    DatabaseConnection(mut conn): DatabaseConnection,
) -> AppResult<Json<UserResponse>> {
    let user = users::table
        .find(user_id)
        .select(UserProfile::as_select())
        .first(&mut conn)
        .await
        .optional()?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserResponse { user }))
}
