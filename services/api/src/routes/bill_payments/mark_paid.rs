use axum::{extract::State, http::StatusCode, Json};
use chrono::{NaiveTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};
use postgres_models::models::{
    Bill, BillPayment, Category, NewBillPayment, NewTransaction, PaymentStatus, Transaction,
    TransactionKind,
};
use postgres_models::schema::{bill_payments, bills, transactions};
use scoped_futures::ScopedFutureExt;
use serde::{Deserialize, Serialize};

use super::list::payments_for;
use crate::{
    errors::{AppError, AppResult},
    extractors::{AppJson, AuthUser, DatabaseConnection},
    finance::period::{parse_year_month, year_month},
    state::AppState,
};

const PAYMENT_DESCRIPTION: &str = "Bill payment";

#[derive(Debug, Serialize, Deserialize)]
pub struct MarkPaidRequest {
    pub bill_id: i32,
    /// `YYYY-MM`
    pub month: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MarkPaidResponse {
    pub payments: Vec<BillPayment>,
    pub transaction: Transaction,
}

/// Marks a bill paid for a month and books the matching expense.
///
/// Both rows are written in one database transaction. Timestamps use the
/// configured local offset.
pub async fn handler(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    DatabaseConnection(mut conn): DatabaseConnection,
    AppJson(request): AppJson<MarkPaidRequest>,
) -> AppResult<(StatusCode, Json<MarkPaidResponse>)> {
    let month = parse_year_month(&request.month)
        .map(year_month)
        .ok_or_else(|| AppError::bad_request("month must be in YYYY-MM format"))?;
    let bill_id = request.bill_id;
    let local_now = Utc::now().with_timezone(&state.local_offset).naive_local();

    let response = conn
        .transaction::<_, AppError, _>(move |conn| {
            async move {
                let bill: Bill = bills::table
                    .filter(bills::id.eq(bill_id))
                    .filter(bills::user_id.eq(user_id))
                    .select(Bill::as_select())
                    .first(conn)
                    .await
                    .optional()?
                    .ok_or_else(|| AppError::not_found("Bill not found"))?;

                diesel::insert_into(bill_payments::table)
                    .values(&NewBillPayment {
                        user_id,
                        bill_id,
                        month,
                        status: PaymentStatus::Paid.as_str().to_string(),
                        paid_on: local_now,
                    })
                    .execute(conn)
                    .await?;

                let transaction = diesel::insert_into(transactions::table)
                    .values(&NewTransaction {
                        user_id,
                        title: bill.name,
                        amount: bill.amount,
                        type_: TransactionKind::Expense.as_str().to_string(),
                        category: Category::for_bill(bill.category_id).to_string(),
                        date: local_now.date().and_time(NaiveTime::MIN),
                        description: Some(PAYMENT_DESCRIPTION.to_string()),
                    })
                    .returning(Transaction::as_returning())
                    .get_result(conn)
                    .await?;

                let payments = payments_for(conn, user_id).await?;
                Ok(MarkPaidResponse {
                    payments,
                    transaction,
                })
            }
            .scope_boxed()
        })
        .await?;

    tracing::info!(user_id, bill_id, transaction_id = response.transaction.id, "bill marked paid");
    Ok((StatusCode::CREATED, Json(response)))
}
