use axum::{http::StatusCode, Json};
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::models::{Category, NewTransaction, Transaction, TransactionKind};
use postgres_models::schema::transactions;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    extractors::{AppJson, AuthUser, DatabaseConnection},
    routes::validation::{non_negative, parse_timestamp, required_text},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub title: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: Category,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Record an income or expense. `date` defaults to now.
pub async fn handler(
    AuthUser(user_id): AuthUser,
    DatabaseConnection(mut conn): DatabaseConnection,
    AppJson(request): AppJson<CreateTransactionRequest>,
) -> AppResult<(StatusCode, Json<Transaction>)> {
    if request.category.is_empty() {
        return Err(AppError::bad_request("category is required"));
    }

    let date = match request.date.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(raw) => parse_timestamp(raw)?,
        None => Utc::now().naive_utc(),
    };

    let new_transaction = NewTransaction {
        user_id,
        title: required_text("title", &request.title)?,
        amount: non_negative("amount", request.amount)?,
        type_: request.kind.as_str().to_string(),
        category: request.category.to_string(),
        date,
        description: request.description,
    };

    let row = diesel::insert_into(transactions::table)
        .values(&new_transaction)
        .returning(Transaction::as_returning())
        .get_result(&mut conn)
        .await?;

    tracing::info!(user_id, transaction_id = row.id, "transaction created");
    Ok((StatusCode::CREATED, Json(row)))
}
