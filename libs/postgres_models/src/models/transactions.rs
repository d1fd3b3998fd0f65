use crate::schema::transactions;
use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::Category;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Transaction {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub type_: String,
    pub category: String,
    pub date: NaiveDateTime,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn kind(&self) -> Option<TransactionKind> {
        TransactionKind::parse(&self.type_)
    }

    pub fn category(&self) -> Category {
        Category::parse(&self.category)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = transactions)]
pub struct NewTransaction {
    pub user_id: i32,
    pub title: String,
    pub amount: f64,
    pub type_: String,
    pub category: String,
    pub date: NaiveDateTime,
    pub description: Option<String>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = transactions)]
pub struct TransactionChanges {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub type_: Option<String>,
    pub category: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub description: Option<String>,
}

impl TransactionChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.type_.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.description.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}
