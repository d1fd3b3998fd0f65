use crate::schema::bill_payments;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A bill settled for one `YYYY-MM` month.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = bill_payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BillPayment {
    pub id: i32,
    pub user_id: i32,
    pub bill_id: i32,
    pub month: String,
    pub status: String,
    pub paid_on: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bill_payments)]
pub struct NewBillPayment {
    pub user_id: i32,
    pub bill_id: i32,
    pub month: String,
    pub status: String,
    pub paid_on: NaiveDateTime,
}

/// Stored payment status. A payment row only exists once the bill is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
        }
    }
}
