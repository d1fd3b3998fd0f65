use axum::{http::StatusCode, Json};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::models::{Budget, NewBudget};
use postgres_models::schema::budgets;
use serde::{Deserialize, Serialize};

use crate::{
    errors::AppResult,
    extractors::{AppJson, AuthUser, DatabaseConnection},
    routes::validation::{non_negative, required_text},
};

fn default_active() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBudgetRequest {
    pub name: String,
    pub category_id: i32,
    pub limit: f64,
    #[serde(default = "default_active")]
    pub active: bool,
}

pub async fn handler(
    AuthUser(user_id): AuthUser,
    DatabaseConnection(mut conn): DatabaseConnection,
    AppJson(request): AppJson<CreateBudgetRequest>,
) -> AppResult<(StatusCode, Json<Budget>)> {
    let new_budget = NewBudget {
        user_id,
        name: required_text("name", &request.name)?,
        category_id: request.category_id,
        limit: non_negative("limit", request.limit)?,
        active: request.active,
    };

    let row = diesel::insert_into(budgets::table)
        .values(&new_budget)
        .returning(Budget::as_returning())
        .get_result(&mut conn)
        .await?;

    tracing::info!(user_id, budget_id = row.id, "budget created");
    Ok((StatusCode::CREATED, Json(row)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn budgets_are_active_unless_stated() {
        let request: CreateBudgetRequest =
            serde_json::from_value(json!({ "name": "Food", "category_id": 3, "limit": 5000 })).unwrap();
        assert!(request.active);
        assert_eq!(request.limit, 5000.0);
    }
}
