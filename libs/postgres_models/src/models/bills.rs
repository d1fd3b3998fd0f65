use crate::schema::bills;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = bills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Bill {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub amount: f64,
    pub due_day: i32,
    pub frequency: String,
    pub auto_pay: bool,
    pub active: bool,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bills)]
pub struct NewBill {
    pub user_id: i32,
    pub name: String,
    pub amount: f64,
    pub due_day: i32,
    pub frequency: String,
    pub auto_pay: bool,
    pub active: bool,
    pub category_id: Option<i32>,
}

/// Partial update. `category_id` is doubly optional so a client can clear it.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = bills)]
pub struct BillChanges {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub due_day: Option<i32>,
    pub frequency: Option<String>,
    pub auto_pay: Option<bool>,
    pub active: Option<bool>,
    pub category_id: Option<Option<i32>>,
}

impl BillChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.amount.is_none()
            && self.due_day.is_none()
            && self.frequency.is_none()
            && self.auto_pay.is_none()
            && self.active.is_none()
            && self.category_id.is_none()
    }
}
