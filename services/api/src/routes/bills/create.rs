use axum::{http::StatusCode, Json};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::models::{Bill, NewBill};
use postgres_models::schema::bills;
use serde::{Deserialize, Serialize};

use super::{category_ref, due_day};
use crate::{
    errors::AppResult,
    extractors::{AppJson, AuthUser, DatabaseConnection},
    routes::validation::{non_negative, required_text},
};

fn default_active() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBillRequest {
    pub name: String,
    pub amount: f64,
    pub due_day: i32,
    pub frequency: String,
    #[serde(default)]
    pub auto_pay: bool,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub category_id: Option<i32>,
}

pub async fn handler(
    AuthUser(user_id): AuthUser,
    DatabaseConnection(mut conn): DatabaseConnection,
    AppJson(request): AppJson<CreateBillRequest>,
) -> AppResult<(StatusCode, Json<Bill>)> {
    let new_bill = NewBill {
        user_id,
        name: required_text("name", &request.name)?,
        amount: non_negative("amount", request.amount)?,
        due_day: due_day(request.due_day)?,
        frequency: required_text("frequency", &request.frequency)?,
        auto_pay: request.auto_pay,
        active: request.active,
        category_id: category_ref(request.category_id),
    };

    let row = diesel::insert_into(bills::table)
        .values(&new_bill)
        .returning(Bill::as_returning())
        .get_result(&mut conn)
        .await?;

    tracing::info!(user_id, bill_id = row.id, "bill created");
    Ok((StatusCode::CREATED, Json(row)))
}
