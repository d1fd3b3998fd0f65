use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const DEFAULT_LAST_N: i64 = 3;
const MAX_LAST_N: i64 = 24;
const MAX_YEAR: i32 = 9999;
/// Months of history compared against when the period is unbounded.
pub const ALL_TIME_COMPARE_MONTHS: u32 = 12;

/// Reporting window requested by the client.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "type")]
pub enum PeriodDescriptor {
    #[serde(rename = "month")]
    Month {
        #[serde(default)]
        ym: Option<String>,
    },
    #[serde(rename = "lastN")]
    LastN {
        #[serde(default, deserialize_with = "lenient_count")]
        n: Option<i64>,
    },
    #[serde(rename = "all")]
    All,
    #[default]
    #[serde(rename = "thisMonth", other)]
    ThisMonth,
}

/// Accepts `6`, `6.0` or `"6"`. Zero and anything unreadable count as absent.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let n = match &value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    };
    Ok(n.filter(|n| *n != 0))
}

impl PeriodDescriptor {
    /// Lenient parse: anything unrecognisable means this month.
    pub fn from_json(value: Option<&Value>) -> Self {
        value
            .filter(|v| v.is_object())
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PeriodKind {
    ThisMonth,
    Month,
    LastN,
    All,
}

/// Half-open date range `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn start(&self) -> NaiveDateTime {
        self.from.and_time(chrono::NaiveTime::MIN)
    }

    pub fn end(&self) -> NaiveDateTime {
        self.to.and_time(chrono::NaiveTime::MIN)
    }

    /// Every `YYYY-MM` month the range touches, oldest first.
    pub fn months(&self) -> Vec<String> {
        let mut months = Vec::new();
        let mut cursor = Some(first_of_month(self.from));
        while let Some(month) = cursor.filter(|m| *m < self.to) {
            months.push(year_month(month));
            cursor = month.checked_add_months(Months::new(1));
        }
        months
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPeriod {
    #[serde(rename = "type")]
    pub kind: PeriodKind,
    pub label: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub ym: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
}

impl ResolvedPeriod {
    pub fn range(&self) -> Option<DateRange> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some(DateRange { from, to }),
            _ => None,
        }
    }

    /// Window used for month-by-month series. Unbounded periods fall back to
    /// the trailing twelve months including the current one.
    pub fn comparison_window(&self, today: NaiveDate) -> DateRange {
        self.range().unwrap_or_else(|| {
            let this_month = first_of_month(today);
            trailing_months(this_month, ALL_TIME_COMPARE_MONTHS).unwrap_or(DateRange {
                from: this_month,
                to: next_month(this_month),
            })
        })
    }
}

pub fn resolve(period: &PeriodDescriptor, today: NaiveDate) -> ResolvedPeriod {
    let this_month = first_of_month(today);

    match period {
        PeriodDescriptor::All => ResolvedPeriod {
            kind: PeriodKind::All,
            label: "All time".to_string(),
            from: None,
            to: None,
            ym: None,
            n: None,
        },
        PeriodDescriptor::Month { ym: None } => single_month(PeriodKind::Month, this_month),
        PeriodDescriptor::Month { ym: Some(raw) } => {
            match parse_year_month(raw).filter(|from| from.checked_add_months(Months::new(1)).is_some()) {
                Some(from) => single_month(PeriodKind::Month, from),
                None => single_month(PeriodKind::ThisMonth, this_month),
            }
        }
        PeriodDescriptor::LastN { n } => {
            let n = n.unwrap_or(DEFAULT_LAST_N).clamp(1, MAX_LAST_N) as u32;
            match trailing_months(this_month, n) {
                Some(range) => ResolvedPeriod {
                    kind: PeriodKind::LastN,
                    label: format!("Last {} months", n),
                    from: Some(range.from),
                    to: Some(range.to),
                    ym: None,
                    n: Some(n),
                },
                None => single_month(PeriodKind::ThisMonth, this_month),
            }
        }
        PeriodDescriptor::ThisMonth => single_month(PeriodKind::ThisMonth, this_month),
    }
}

fn single_month(kind: PeriodKind, from: NaiveDate) -> ResolvedPeriod {
    let ym = year_month(from);
    ResolvedPeriod {
        kind,
        label: ym.clone(),
        from: Some(from),
        to: Some(next_month(from)),
        ym: Some(ym),
        n: None,
    }
}

/// `count` whole months ending with the month of `this_month`.
fn trailing_months(this_month: NaiveDate, count: u32) -> Option<DateRange> {
    Some(DateRange {
        from: this_month.checked_sub_months(Months::new(count.saturating_sub(1)))?,
        to: this_month.checked_add_months(Months::new(1))?,
    })
}

/// First day of the following month, or `date` itself at the end of the calendar.
fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(date)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn year_month(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_year_month(raw: &str) -> Option<NaiveDate> {
    let (year, month) = raw.trim().split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    if !(1..=MAX_YEAR).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, 1)
}
