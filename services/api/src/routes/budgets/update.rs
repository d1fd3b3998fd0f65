use axum::Json;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::models::{Budget, BudgetChanges};
use postgres_models::schema::budgets;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    extractors::{AppJson, AppPath, AuthUser, DatabaseConnection},
    routes::validation::{non_negative, optional_text},
};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateBudgetRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category_id: Option<i32>,
    #[serde(default)]
    pub limit: Option<f64>,
    #[serde(default)]
    pub active: Option<bool>,
}

pub async fn handler(
    AuthUser(user_id): AuthUser,
    AppPath(id): AppPath<i32>,
    DatabaseConnection(mut conn): DatabaseConnection,
    AppJson(request): AppJson<UpdateBudgetRequest>,
) -> AppResult<Json<Budget>> {
    let changes = BudgetChanges {
        name: optional_text("name", request.name)?,
        category_id: request.category_id,
        limit: request.limit.map(|l| non_negative("limit", l)).transpose()?,
        active: request.active,
    };
    let owned = budgets::table
        .filter(budgets::id.eq(id))
        .filter(budgets::user_id.eq(user_id));

    let row = if changes.is_empty() {
        owned
            .select(Budget::as_select())
            .first(&mut conn)
            .await
            .optional()?
    } else {
        diesel::update(owned)
            .set(&changes)
            .returning(Budget::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?
    };

    row.map(Json)
        .ok_or_else(|| AppError::not_found("Budget not found"))
}
