use axum::Json;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use postgres_models::models::{Bill, BillChanges};
use postgres_models::schema::bills;
use serde::{Deserialize, Serialize};

use super::{category_ref, due_day};
use crate::{
    errors::{AppError, AppResult},
    extractors::{AppJson, AppPath, AuthUser, DatabaseConnection},
    routes::validation::{double_option, non_negative, optional_text},
};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateBillRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub due_day: Option<i32>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub auto_pay: Option<bool>,
    #[serde(default)]
    pub active: Option<bool>,
    /// `null` clears the category.
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<i32>>,
}

impl UpdateBillRequest {
    fn into_changes(self) -> Result<BillChanges, AppError> {
        Ok(BillChanges {
            name: optional_text("name", self.name)?,
            amount: self.amount.map(|a| non_negative("amount", a)).transpose()?,
            due_day: self.due_day.map(due_day).transpose()?,
            frequency: optional_text("frequency", self.frequency)?,
            auto_pay: self.auto_pay,
            active: self.active,
            category_id: self.category_id.map(category_ref),
        })
    }
}

pub async fn handler(
    AuthUser(user_id): AuthUser,
    AppPath(id): AppPath<i32>,
    DatabaseConnection(mut conn): DatabaseConnection,
    AppJson(request): AppJson<UpdateBillRequest>,
) -> AppResult<Json<Bill>> {
    let changes = request.into_changes()?;
    let owned = bills::table
        .filter(bills::id.eq(id))
        .filter(bills::user_id.eq(user_id));

    let row = if changes.is_empty() {
        owned
            .select(Bill::as_select())
            .first(&mut conn)
            .await
            .optional()?
    } else {
        diesel::update(owned)
            .set(&changes)
            .returning(Bill::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?
    };

    row.map(Json).ok_or_else(|| AppError::not_found("Bill not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_category_clears_and_absent_category_keeps() {
        let cleared: UpdateBillRequest = serde_json::from_value(json!({ "category_id": null })).unwrap();
        assert_eq!(cleared.into_changes().unwrap().category_id, Some(None));

        let kept: UpdateBillRequest = serde_json::from_value(json!({ "active": false })).unwrap();
        let changes = kept.into_changes().unwrap();
        assert_eq!(changes.category_id, None);
        assert_eq!(changes.active, Some(false));
    }

    #[test]
    fn zero_category_clears() {
        let request: UpdateBillRequest = serde_json::from_value(json!({ "category_id": 0 })).unwrap();
        assert_eq!(request.into_changes().unwrap().category_id, Some(None));
    }

    #[test]
    fn due_day_is_validated_on_update() {
        let request: UpdateBillRequest = serde_json::from_value(json!({ "due_day": 40 })).unwrap();
        assert!(request.into_changes().is_err());
    }
}
