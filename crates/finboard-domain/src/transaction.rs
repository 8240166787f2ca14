//! Raw transaction records as delivered by the transaction store.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::common::FlowKind;

/// A single money movement. Scan-derived records may split their amount across sub-categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    #[serde(default)]
    pub account_ref: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    /// Calendar day of the movement. Timestamps are accepted and keep only their date.
    #[serde(deserialize_with = "calendar_date")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub source: TransactionSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_categories: Option<Vec<SubCategory>>,
}

impl Transaction {
    pub fn new(
        account_ref: impl Into<String>,
        kind: TransactionType,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_ref: account_ref.into(),
            kind,
            amount,
            category: category.into(),
            date,
            description: None,
            source: TransactionSource::Manual,
            sub_categories: None,
        }
    }

    pub fn with_source(mut self, source: TransactionSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_sub_categories(mut self, sub_categories: Vec<SubCategory>) -> Self {
        self.sub_categories = Some(sub_categories);
        self
    }

    pub fn flow(&self) -> FlowKind {
        self.kind.flow()
    }
}

fn calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).ok_or_else(|| {
        de::Error::custom(format!(
            "invalid date `{raw}`, expected YYYY-MM-DD or an RFC 3339 timestamp"
        ))
    })
}

// Time-of-day is dropped; an offset timestamp keeps the date it names in its own offset.
fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|at| at.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|at| at.date())
        })
}

/// One slice of a multi-category (scanned bill) transaction.
///
/// `category` is optional so malformed extraction output still deserializes and can be flagged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubCategory {
    #[serde(default)]
    pub category: Option<String>,
    pub amount: f64,
}

impl SubCategory {
    pub fn new(category: impl Into<String>, amount: f64) -> Self {
        Self {
            category: Some(category.into()),
            amount,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Debit,
    Credit,
}

impl TransactionType {
    /// Debits are spending, credits are income.
    pub fn flow(self) -> FlowKind {
        match self {
            TransactionType::Debit => FlowKind::Expense,
            TransactionType::Credit => FlowKind::Income,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionType::Debit => "debit",
            TransactionType::Credit => "credit",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionSource {
    #[default]
    Manual,
    Scan,
    Import,
}

impl fmt::Display for TransactionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionSource::Manual => "manual",
            TransactionSource::Scan => "scan",
            TransactionSource::Import => "import",
        };
        f.write_str(label)
    }
}
