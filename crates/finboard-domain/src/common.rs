//! Flow and bucketing enums shared by every reconciliation primitive.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Direction of money flow used to pair actuals with budgets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    Expense,
    Income,
}

impl FlowKind {
    pub const ALL: [FlowKind; 2] = [FlowKind::Expense, FlowKind::Income];

    pub fn as_str(self) -> &'static str {
        match self {
            FlowKind::Expense => "expense",
            FlowKind::Income => "income",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(FlowKind::Expense),
            "income" => Ok(FlowKind::Income),
            other => Err(format!("unknown flow kind `{other}`")),
        }
    }
}

/// Time bucket granularity used for trend series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Bucketing {
    #[default]
    Day,
    Week,
    Month,
}

impl Bucketing {
    /// Returns the first calendar day of the bucket containing `date`.
    ///
    /// Weeks follow ISO-8601 and therefore start on Monday.
    pub fn anchor(self, date: NaiveDate) -> NaiveDate {
        match self {
            Bucketing::Day => date,
            Bucketing::Week => {
                let delta = date.weekday().num_days_from_monday() as i64;
                date - Duration::days(delta)
            }
            Bucketing::Month => date - Duration::days(date.day0() as i64),
        }
    }

    /// Returns the first day of the bucket following the one anchored at `anchor`.
    pub fn next_anchor(self, anchor: NaiveDate) -> NaiveDate {
        match self {
            Bucketing::Day => anchor + Duration::days(1),
            Bucketing::Week => anchor + Duration::weeks(1),
            Bucketing::Month => {
                let (year, month) = if anchor.month() == 12 {
                    (anchor.year() + 1, 1)
                } else {
                    (anchor.year(), anchor.month() + 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(anchor + Duration::days(31))
            }
        }
    }
}

impl fmt::Display for Bucketing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Bucketing::Day => "day",
            Bucketing::Week => "week",
            Bucketing::Month => "month",
        };
        f.write_str(label)
    }
}

impl FromStr for Bucketing {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" | "date" => Ok(Bucketing::Day),
            "week" | "weekly" => Ok(Bucketing::Week),
            "month" | "monthly" => Ok(Bucketing::Month),
            other => Err(format!("unknown bucketing `{other}`")),
        }
    }
}
