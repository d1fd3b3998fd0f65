use crate::schema::pots;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A savings goal. `current` only moves through pot movements.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = pots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Pot {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub target: f64,
    pub current: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pots)]
pub struct NewPot {
    pub user_id: i32,
    pub name: String,
    pub target: f64,
    pub current: f64,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = pots)]
pub struct PotChanges {
    pub name: Option<String>,
    pub target: Option<f64>,
}

impl PotChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.target.is_none()
    }
}
