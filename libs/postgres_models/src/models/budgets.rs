use crate::schema::budgets;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = budgets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Budget {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub category_id: i32,
    pub limit: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = budgets)]
pub struct NewBudget {
    pub user_id: i32,
    pub name: String,
    pub category_id: i32,
    pub limit: f64,
    pub active: bool,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = budgets)]
pub struct BudgetChanges {
    pub name: Option<String>,
    pub category_id: Option<i32>,
    pub limit: Option<f64>,
    pub active: Option<bool>,
}

impl BudgetChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category_id.is_none()
            && self.limit.is_none()
            && self.active.is_none()
    }
}
