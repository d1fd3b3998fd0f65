use axum::Json;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use postgres_models::models::BillPayment;
use postgres_models::schema::bill_payments;

use crate::{
    errors::AppResult,
    extractors::{AuthUser, DatabaseConnection},
};

pub(super) async fn payments_for(
    conn: &mut AsyncPgConnection,
    user_id: i32,
) -> QueryResult<Vec<BillPayment>> {
    bill_payments::table
        .filter(bill_payments::user_id.eq(user_id))
        .select(BillPayment::as_select())
        .order((bill_payments::month.desc(), bill_payments::id.desc()))
        .load(conn)
        .await
}

pub async fn handler(
    AuthUser(user_id): AuthUser,
    DatabaseConnection(mut conn): DatabaseConnection,
) -> AppResult<Json<Vec<BillPayment>>> {
    let rows = payments_for(&mut conn, user_id).await?;

    tracing::debug!(user_id, count = rows.len(), "listed bill payments");
    Ok(Json(rows))
}
