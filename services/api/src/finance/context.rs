//! Folds a user's rows into the JSON snapshot handed to the language model.
//!
//! Everything here is pure; [`super::fetch`] loads the inputs.

use chrono::NaiveDateTime;
use postgres_models::models::{Bill, Budget, Pot, Transaction, TransactionKind};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use super::fetch::{FinanceSnapshot, MonthBillsPaid, MonthTotals};
use super::period::{DateRange, ResolvedPeriod};

pub const CURRENCY: &str = "INR";
pub const TOP_CATEGORIES: usize = 8;
pub const TOP_BUDGETS: usize = 12;
pub const RECENT_TRANSACTIONS: usize = 20;
pub const MAX_ACTIVE_BILLS: usize = 50;
pub const UNKNOWN_CATEGORY: &str = "unknown";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceContext {
    pub currency: &'static str,
    pub period: ResolvedPeriod,
    pub compare_window: DateRange,
    pub totals: Totals,
    pub monthly_tx: Vec<MonthlySeriesPoint>,
    pub bills_paid_monthly: Vec<BillsPaidPoint>,
    pub top_categories: Vec<CategoryTotal>,
    pub budget_status: Vec<BudgetStatus>,
    pub pots: PotSummary,
    pub bills: BillSummary,
    pub recent_transactions: Vec<RecentTransaction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySeriesPoint {
    pub ym: String,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillsPaidPoint {
    pub ym: String,
    pub paid_count: i64,
    pub paid_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub key: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
    pub limit: f64,
    pub spent: f64,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PotSummary {
    pub count: usize,
    pub total_saved: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    pub count: usize,
    pub active_count: usize,
    pub active_bills: Vec<ActiveBill>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActiveBill {
    pub id: i32,
    pub name: String,
    pub amount: f64,
    pub due_day: i32,
    pub frequency: String,
    pub auto_pay: bool,
    pub category_id: Option<i32>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentTransaction {
    pub id: i32,
    pub title: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub date: NaiveDateTime,
}

pub fn round2(value: f64) -> f64 {
    round_to(value, 100.0)
}

pub fn round1(value: f64) -> f64 {
    round_to(value, 10.0)
}

fn round_to(value: f64, scale: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let rounded = (value * scale).round() / scale;
    // Avoid serializing -0.0.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

pub fn build_context(
    period: ResolvedPeriod,
    compare_window: DateRange,
    snapshot: FinanceSnapshot,
) -> FinanceContext {
    let months = compare_window.months();
    let FinanceSnapshot {
        transactions,
        monthly,
        budgets,
        pots,
        bills,
        bills_paid,
    } = snapshot;

    FinanceContext {
        currency: CURRENCY,
        period,
        compare_window,
        totals: totals(&transactions),
        monthly_tx: monthly_series(&months, &monthly),
        bills_paid_monthly: bills_paid_series(&months, &bills_paid),
        top_categories: top_categories(&transactions),
        budget_status: budget_status(&budgets, &transactions),
        pots: pot_summary(&pots),
        bills: bill_summary(&bills),
        recent_transactions: transactions
            .iter()
            .take(RECENT_TRANSACTIONS)
            .map(|t| RecentTransaction {
                id: t.id,
                title: t.title.clone(),
                amount: round2(t.amount),
                kind: t.type_.clone(),
                category: t.category.clone(),
                date: t.date,
            })
            .collect(),
    }
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let (income, expense) = transactions
        .iter()
        .fold((0.0, 0.0), |(income, expense), t| match t.kind() {
            Some(TransactionKind::Income) => (income + finite(t.amount), expense),
            Some(TransactionKind::Expense) => (income, expense + finite(t.amount)),
            None => (income, expense),
        });

    Totals {
        income: round2(income),
        expense: round2(expense),
        net: round2(income - expense),
    }
}

/// One point per month of the window; months without rows are zero.
pub fn monthly_series(months: &[String], rows: &[MonthTotals]) -> Vec<MonthlySeriesPoint> {
    let by_month: HashMap<&str, &MonthTotals> = rows.iter().map(|r| (r.ym.as_str(), r)).collect();

    months
        .iter()
        .map(|ym| {
            let (income, expense) = by_month
                .get(ym.as_str())
                .map(|r| (finite(r.income), finite(r.expense)))
                .unwrap_or((0.0, 0.0));
            MonthlySeriesPoint {
                ym: ym.clone(),
                income: round2(income),
                expense: round2(expense),
                net: round2(income - expense),
            }
        })
        .collect()
}

/// One point per month of the window; months without paid bills are zero.
pub fn bills_paid_series(months: &[String], rows: &[MonthBillsPaid]) -> Vec<BillsPaidPoint> {
    let by_month: HashMap<&str, &MonthBillsPaid> = rows.iter().map(|r| (r.ym.as_str(), r)).collect();

    months
        .iter()
        .map(|ym| match by_month.get(ym.as_str()) {
            Some(row) => BillsPaidPoint {
                ym: ym.clone(),
                paid_count: row.paid_count,
                paid_total: round2(finite(row.paid_total)),
            },
            None => BillsPaidPoint {
                ym: ym.clone(),
                paid_count: 0,
                paid_total: 0.0,
            },
        })
        .collect()
}

pub fn top_categories(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut by_category: HashMap<String, f64> = HashMap::new();
    for t in transactions.iter().filter(|t| t.kind() == Some(TransactionKind::Expense)) {
        let key = t
            .category()
            .id()
            .map(|id| id.to_string())
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
        *by_category.entry(key).or_insert(0.0) += finite(t.amount);
    }

    let mut ranked: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(key, total)| CategoryTotal { key, total: round2(total) })
        .collect();
    ranked.sort_by(|a, b| descending(a.total, b.total).then_with(|| a.key.cmp(&b.key)));
    ranked.truncate(TOP_CATEGORIES);
    ranked
}

/// Spending against each active budget. A zero limit reports 0 %.
pub fn budget_status(budgets: &[Budget], transactions: &[Transaction]) -> Vec<BudgetStatus> {
    let mut spent_by_category: HashMap<i32, f64> = HashMap::new();
    for t in transactions.iter().filter(|t| t.kind() == Some(TransactionKind::Expense)) {
        if let Some(id) = t.category().id() {
            *spent_by_category.entry(id).or_insert(0.0) += finite(t.amount);
        }
    }

    let mut statuses: Vec<BudgetStatus> = budgets
        .iter()
        .filter(|b| b.active)
        .map(|b| {
            let spent = spent_by_category.get(&b.category_id).copied().unwrap_or(0.0);
            let limit = finite(b.limit);
            let pct = if limit == 0.0 { 0.0 } else { spent / limit * 100.0 };
            BudgetStatus {
                id: b.id,
                name: b.name.clone(),
                category_id: b.category_id,
                limit: round2(limit),
                spent: round2(spent),
                pct: round1(pct),
            }
        })
        .collect();

    statuses.sort_by(|a, b| descending(a.pct, b.pct).then_with(|| a.id.cmp(&b.id)));
    statuses.truncate(TOP_BUDGETS);
    statuses
}

pub fn pot_summary(pots: &[Pot]) -> PotSummary {
    PotSummary {
        count: pots.len(),
        total_saved: round2(pots.iter().map(|p| finite(p.current)).sum()),
    }
}

pub fn bill_summary(bills: &[Bill]) -> BillSummary {
    let active: Vec<&Bill> = bills.iter().filter(|b| b.active).collect();

    BillSummary {
        count: bills.len(),
        active_count: active.len(),
        active_bills: active
            .into_iter()
            .take(MAX_ACTIVE_BILLS)
            .map(|b| ActiveBill {
                id: b.id,
                name: b.name.clone(),
                amount: round2(b.amount),
                due_day: b.due_day,
                frequency: b.frequency.clone(),
                auto_pay: b.auto_pay,
                category_id: b.category_id,
                active: b.active,
            })
            .collect(),
    }
}

fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::period::{resolve, PeriodDescriptor};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(id: i32, kind: &str, amount: f64, category: &str) -> Transaction {
        Transaction {
            id,
            user_id: 1,
            title: format!("tx {}", id),
            amount,
            type_: kind.to_string(),
            category: category.to_string(),
            date: date(2026, 10, 1).and_hms_opt(12, 0, 0).unwrap(),
            description: None,
            created_at: Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap(),
        }
    }

    fn budget(id: i32, category_id: i32, limit: f64, active: bool) -> Budget {
        Budget {
            id,
            user_id: 1,
            name: format!("budget {}", id),
            category_id,
            limit,
            active,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn bill(id: i32, active: bool) -> Bill {
        Bill {
            id,
            user_id: 1,
            name: format!("bill {}", id),
            amount: 499.0,
            due_day: 5,
            frequency: "monthly".to_string(),
            auto_pay: false,
            active,
            category_id: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn totals_are_rounded_to_cents() {
        let rows = vec![
            tx(1, "income", 1000.106, "1"),
            tx(2, "expense", 0.1, "2"),
            tx(3, "expense", 0.2, "2"),
            tx(4, "transfer", 50.0, "2"),
        ];

        let totals = totals(&rows);
        assert_eq!(totals.income, 1000.11);
        assert_eq!(totals.expense, 0.3);
        assert_eq!(totals.net, 999.81);
    }

    #[test]
    fn top_categories_are_sorted_and_capped() {
        let mut rows: Vec<Transaction> = (1..=10)
            .map(|i| tx(i, "expense", i as f64 * 10.0, &i.to_string()))
            .collect();
        rows.push(tx(11, "expense", 5.0, "Bills"));
        rows.push(tx(12, "income", 10_000.0, "1"));

        let top = top_categories(&rows);
        assert_eq!(top.len(), TOP_CATEGORIES);
        assert_eq!(top[0], CategoryTotal { key: "10".into(), total: 100.0 });
        assert!(top.windows(2).all(|pair| pair[0].total >= pair[1].total));
        assert!(top.iter().all(|c| c.key != UNKNOWN_CATEGORY));
    }

    #[test]
    fn labelled_categories_collapse_into_unknown() {
        let rows = vec![
            tx(1, "expense", 30.0, "Bills"),
            tx(2, "expense", 20.0, "groceries"),
            tx(3, "expense", 10.0, "4"),
        ];

        let top = top_categories(&rows);
        assert_eq!(top[0], CategoryTotal { key: UNKNOWN_CATEGORY.into(), total: 50.0 });
        assert_eq!(top[1], CategoryTotal { key: "4".into(), total: 10.0 });
    }

    #[test]
    fn budget_utilization_ranks_active_budgets() {
        let rows = vec![
            tx(1, "expense", 450.0, "1"),
            tx(2, "expense", 50.0, "1"),
            tx(3, "expense", 90.0, "2"),
            tx(4, "income", 999.0, "2"),
        ];
        let budgets = vec![
            budget(1, 1, 1000.0, true),
            budget(2, 2, 100.0, true),
            budget(3, 3, 0.0, true),
            budget(4, 1, 10.0, false),
        ];

        let status = budget_status(&budgets, &rows);
        assert_eq!(status.len(), 3);
        assert_eq!((status[0].id, status[0].pct, status[0].spent), (2, 90.0, 90.0));
        assert_eq!((status[1].id, status[1].pct), (1, 50.0));
        assert_eq!((status[2].id, status[2].pct), (3, 0.0));
    }

    #[test]
    fn budget_status_never_exceeds_twelve() {
        let budgets: Vec<Budget> = (1..=20).map(|i| budget(i, i, 100.0, true)).collect();
        let rows: Vec<Transaction> = (1..=20).map(|i| tx(i, "expense", i as f64, &i.to_string())).collect();

        let status = budget_status(&budgets, &rows);
        assert_eq!(status.len(), TOP_BUDGETS);
        assert_eq!(status[0].id, 20);
        assert!(status.windows(2).all(|pair| pair[0].pct >= pair[1].pct));
    }

    #[test]
    fn series_are_zero_filled_across_the_window() {
        let today = date(2026, 10, 19);
        let window = resolve(&PeriodDescriptor::All, today).comparison_window(today);
        let months = window.months();

        let monthly = monthly_series(
            &months,
            &[MonthTotals { ym: "2026-03".into(), income: 5000.0, expense: 1234.567 }],
        );
        let paid = bills_paid_series(
            &months,
            &[MonthBillsPaid { ym: "2026-10".into(), paid_count: 2, paid_total: 998.0 }],
        );

        assert_eq!(monthly.len(), 12);
        assert_eq!(paid.len(), 12);
        assert!(monthly.windows(2).all(|pair| pair[0].ym < pair[1].ym));

        let march = monthly.iter().find(|p| p.ym == "2026-03").unwrap();
        assert_eq!((march.income, march.expense, march.net), (5000.0, 1234.57, 3765.43));
        assert_eq!(monthly[0], MonthlySeriesPoint { ym: "2025-11".into(), income: 0.0, expense: 0.0, net: 0.0 });

        assert_eq!(paid[11], BillsPaidPoint { ym: "2026-10".into(), paid_count: 2, paid_total: 998.0 });
        assert_eq!(paid[0].paid_count, 0);
    }

    #[test]
    fn context_serializes_expected_shape() {
        let today = date(2026, 10, 19);
        let period = resolve(&PeriodDescriptor::ThisMonth, today);
        let window = period.comparison_window(today);
        let snapshot = FinanceSnapshot {
            transactions: (1..=25).map(|i| tx(i, "expense", 10.0, "3")).collect(),
            monthly: vec![],
            budgets: vec![budget(1, 3, 500.0, true)],
            pots: vec![],
            bills: vec![bill(1, true), bill(2, false)],
            bills_paid: vec![],
        };

        let context = build_context(period, window, snapshot);
        let value = serde_json::to_value(&context).unwrap();

        assert_eq!(value["currency"], "INR");
        assert_eq!(value["period"]["type"], "thisMonth");
        assert_eq!(value["compareWindow"]["from"], "2026-10-01");
        assert_eq!(value["totals"]["expense"], 250.0);
        assert_eq!(value["monthlyTx"].as_array().unwrap().len(), 1);
        assert_eq!(value["budgetStatus"][0]["pct"], 50.0);
        assert_eq!(value["pots"]["totalSaved"], 0.0);
        assert_eq!(value["bills"]["activeCount"], 1);
        assert_eq!(value["recentTransactions"].as_array().unwrap().len(), RECENT_TRANSACTIONS);
        assert_eq!(value["recentTransactions"][0]["type"], "expense");
    }

    #[test]
    fn rounding_handles_noise_and_non_finite_values() {
        assert_eq!(round2(0.1 + 0.2), 0.3);
        assert_eq!(round1(66.666), 66.7);
        assert_eq!(round2(f64::NAN), 0.0);
        assert_eq!(round2(-0.001), 0.0);
        assert!(round2(-0.001).is_sign_positive());
    }
}
