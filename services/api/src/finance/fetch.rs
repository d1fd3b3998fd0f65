use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Integer, Text, Timestamp};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use postgres_models::models::{Bill, Budget, Pot, Transaction};
use postgres_models::schema::{bills, budgets, pots, transactions};

use super::period::{year_month, DateRange};

/// Newest transactions considered for the selected period.
pub const TRANSACTION_LIMIT: i64 = 500;

#[derive(Debug, Clone, PartialEq, QueryableByName)]
pub struct MonthTotals {
    #[diesel(sql_type = Text)]
    pub ym: String,
    #[diesel(sql_type = Double)]
    pub income: f64,
    #[diesel(sql_type = Double)]
    pub expense: f64,
}

#[derive(Debug, Clone, PartialEq, QueryableByName)]
pub struct MonthBillsPaid {
    #[diesel(sql_type = Text)]
    pub ym: String,
    #[diesel(sql_type = BigInt)]
    pub paid_count: i64,
    #[diesel(sql_type = Double)]
    pub paid_total: f64,
}

/// Everything the context builder needs for one user.
#[derive(Debug, Clone, Default)]
pub struct FinanceSnapshot {
    pub transactions: Vec<Transaction>,
    pub monthly: Vec<MonthTotals>,
    pub budgets: Vec<Budget>,
    pub pots: Vec<Pot>,
    pub bills: Vec<Bill>,
    pub bills_paid: Vec<MonthBillsPaid>,
}

const MONTHLY_TOTALS_SQL: &str = r#"
    SELECT
        to_char(date_trunc('month', date), 'YYYY-MM') AS ym,
        COALESCE(SUM(CASE WHEN type = 'income' THEN amount ELSE 0 END), 0)::float8 AS income,
        COALESCE(SUM(CASE WHEN type = 'expense' THEN amount ELSE 0 END), 0)::float8 AS expense
    FROM transactions
    WHERE user_id = $1
      AND date >= $2 AND date < $3
    GROUP BY 1
    ORDER BY 1
"#;

const BILLS_PAID_SQL: &str = r#"
    SELECT
        bp.month AS ym,
        COUNT(*) AS paid_count,
        COALESCE(SUM(b.amount), 0)::float8 AS paid_total
    FROM bill_payments bp
    JOIN bills b ON b.id = bp.bill_id
    WHERE bp.user_id = $1
      AND b.user_id = $1
      AND LOWER(bp.status) = 'paid'
      AND bp.month >= $2
      AND bp.month < $3
    GROUP BY bp.month
    ORDER BY bp.month
"#;

/// Loads a user's rows. `period` bounds the transaction list (`None` means
/// all time); `window` bounds the month-by-month series.
pub async fn load_snapshot(
    conn: &mut AsyncPgConnection,
    user_id: i32,
    period: Option<DateRange>,
    window: DateRange,
) -> QueryResult<FinanceSnapshot> {
    let base = transactions::table.filter(transactions::user_id.eq(user_id));
    let transactions = match period {
        Some(range) => {
            base.filter(transactions::date.ge(range.start()))
                .filter(transactions::date.lt(range.end()))
                .select(Transaction::as_select())
                .order((transactions::date.desc(), transactions::created_at.desc()))
                .limit(TRANSACTION_LIMIT)
                .load(conn)
                .await?
        }
        None => {
            base.select(Transaction::as_select())
                .order((transactions::date.desc(), transactions::created_at.desc()))
                .limit(TRANSACTION_LIMIT)
                .load(conn)
                .await?
        }
    };

    let monthly = diesel::sql_query(MONTHLY_TOTALS_SQL)
        .bind::<Integer, _>(user_id)
        .bind::<Timestamp, _>(window.start())
        .bind::<Timestamp, _>(window.end())
        .load::<MonthTotals>(conn)
        .await?;

    let budgets = budgets::table
        .filter(budgets::user_id.eq(user_id))
        .select(Budget::as_select())
        .load(conn)
        .await?;

    let pots = pots::table
        .filter(pots::user_id.eq(user_id))
        .select(Pot::as_select())
        .load(conn)
        .await?;

    let bills = bills::table
        .filter(bills::user_id.eq(user_id))
        .select(Bill::as_select())
        .load(conn)
        .await?;

    let bills_paid = diesel::sql_query(BILLS_PAID_SQL)
        .bind::<Integer, _>(user_id)
        .bind::<Text, _>(year_month(window.from))
        .bind::<Text, _>(year_month(window.to))
        .load::<MonthBillsPaid>(conn)
        .await?;

    tracing::debug!(
        user_id,
        transactions = transactions.len(),
        budgets = budgets.len(),
        pots = pots.len(),
        bills = bills.len(),
        "loaded finance snapshot"
    );

    Ok(FinanceSnapshot {
        transactions,
        monthly,
        budgets,
        pots,
        bills,
        bills_paid,
    })
}
