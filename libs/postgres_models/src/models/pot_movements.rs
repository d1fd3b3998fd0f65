use crate::schema::pot_movements;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only ledger entry against a pot.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = pot_movements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PotMovement {
    pub id: i32,
    pub user_id: i32,
    pub pot_id: i32,
    #[serde(rename = "type")]
    pub type_: String,
    pub amount: f64,
    pub note: Option<String>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pot_movements)]
pub struct NewPotMovement {
    pub user_id: i32,
    pub pot_id: i32,
    pub type_: String,
    pub amount: f64,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Deposit,
    Withdraw,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
        }
    }

    /// The change a movement of `amount` applies to the pot balance.
    pub fn signed(&self, amount: f64) -> f64 {
        match self {
            Self::Deposit => amount,
            Self::Withdraw => -amount,
        }
    }
}
