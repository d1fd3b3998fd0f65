use axum::Json;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::models::{Category, Transaction, TransactionChanges, TransactionKind};
use postgres_models::schema::transactions;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    extractors::{AppJson, AppPath, AuthUser, DatabaseConnection},
    routes::validation::{non_negative, optional_text, parse_timestamp},
};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateTransactionRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default, rename = "type")]
    pub kind: Option<TransactionKind>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateTransactionRequest {
    fn into_changes(self) -> Result<TransactionChanges, AppError> {
        if self.category.as_ref().is_some_and(Category::is_empty) {
            return Err(AppError::bad_request("category is required"));
        }

        Ok(TransactionChanges {
            title: optional_text("title", self.title)?,
            amount: self.amount.map(|a| non_negative("amount", a)).transpose()?,
            type_: self.kind.map(|k| k.as_str().to_string()),
            category: self.category.map(|c| c.to_string()),
            date: self.date.as_deref().map(parse_timestamp).transpose()?,
            description: self.description,
        })
    }
}

pub async fn handler(
    AuthUser(user_id): AuthUser,
    AppPath(id): AppPath<i32>,
    DatabaseConnection(mut conn): DatabaseConnection,
    AppJson(request): AppJson<UpdateTransactionRequest>,
) -> AppResult<Json<Transaction>> {
    let changes = request.into_changes()?;
    let owned = transactions::table
        .filter(transactions::id.eq(id))
        .filter(transactions::user_id.eq(user_id));

    let row = if changes.is_empty() {
        owned
            .select(Transaction::as_select())
            .first(&mut conn)
            .await
            .optional()?
    } else {
        diesel::update(owned)
            .set(&changes)
            .returning(Transaction::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?
    };

    row.map(Json)
        .ok_or_else(|| AppError::not_found("Transaction not found"))
}
