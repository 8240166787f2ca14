//! Immutable request values shared by every engine operation and by the stores.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{common::FlowKind, entry::CategoryKey};

/// Sentinel accepted in place of a category name to mean "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Restricts results to one category or leaves them unfiltered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(into = "String", try_from = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Named(CategoryKey),
}

impl CategoryFilter {
    /// Parses user input; `"All"` (any case) maps to [`CategoryFilter::All`].
    /// Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().eq_ignore_ascii_case(ALL_CATEGORIES) {
            return Some(CategoryFilter::All);
        }
        CategoryKey::parse(raw).map(CategoryFilter::Named)
    }

    pub fn matches(&self, category: &CategoryKey) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(expected) => expected == category,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Named(key) => f.write_str(key.label()),
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CategoryFilter::parse(&value).ok_or_else(|| "category filter must not be blank".into())
    }
}

/// Which flow kinds a request covers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlowFilter {
    Expense,
    Income,
    #[default]
    Both,
}

impl FlowFilter {
    /// Flow kinds covered, expense first.
    pub fn kinds(self) -> &'static [FlowKind] {
        match self {
            FlowFilter::Expense => &[FlowKind::Expense],
            FlowFilter::Income => &[FlowKind::Income],
            FlowFilter::Both => &FlowKind::ALL,
        }
    }

    pub fn includes(self, kind: FlowKind) -> bool {
        self.kinds().contains(&kind)
    }
}

impl From<FlowKind> for FlowFilter {
    fn from(kind: FlowKind) -> Self {
        match kind {
            FlowKind::Expense => FlowFilter::Expense,
            FlowKind::Income => FlowFilter::Income,
        }
    }
}

impl fmt::Display for FlowFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FlowFilter::Expense => "expense",
            FlowFilter::Income => "income",
            FlowFilter::Both => "both",
        };
        f.write_str(label)
    }
}

impl FromStr for FlowFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "both" | "all" => Ok(FlowFilter::Both),
            other => other.parse::<FlowKind>().map(FlowFilter::from),
        }
    }
}

/// Date range (inclusive on both ends), category and flow restriction for a report.
///
/// Construct freely; the engine validates before computing anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default)]
    pub flow: FlowFilter,
}

impl ReportFilter {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            category: CategoryFilter::All,
            flow: FlowFilter::Both,
        }
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_flow(mut self, flow: FlowFilter) -> Self {
        self.flow = flow;
        self
    }

    /// Narrows the filter to a single flow kind.
    pub fn for_kind(&self, kind: FlowKind) -> Self {
        Self {
            flow: FlowFilter::from(kind),
            ..self.clone()
        }
    }

    /// Calendar-date containment; both boundary days are included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Request accepted by a transaction store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQuery {
    pub page: i64,
    pub page_size: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<FlowFilter>,
}

impl TransactionQuery {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page,
            page_size,
            start: None,
            end: None,
            category: None,
            flow: None,
        }
    }

    /// Builds a query for the first page of everything a report filter covers.
    pub fn for_report(filter: &ReportFilter, page_size: i64) -> Self {
        Self {
            page: 1,
            page_size,
            start: Some(filter.start),
            end: Some(filter.end),
            category: Some(filter.category.clone()),
            flow: Some(filter.flow),
        }
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sentinel_is_case_insensitive() {
        assert_eq!(CategoryFilter::parse(" all "), Some(CategoryFilter::All));
        assert_eq!(CategoryFilter::parse(""), None);
        let named = CategoryFilter::parse("Food").unwrap();
        assert!(named.matches(&CategoryKey::new("FOOD")));
        assert!(!named.matches(&CategoryKey::new("Transport")));
    }

    #[test]
    fn category_filter_serializes_as_plain_string() {
        let filter = CategoryFilter::parse("Eating Out").unwrap();
        let json = serde_json::to_string(&filter).unwrap();
        assert_eq!(json, "\"Eating Out\"");
        let back: CategoryFilter = serde_json::from_str("\"All\"").unwrap();
        assert!(back.is_all());
        assert!(serde_json::from_str::<CategoryFilter>("\"  \"").is_err());
    }

    #[test]
    fn range_includes_both_boundaries() {
        let filter = ReportFilter::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        assert!(filter.contains(filter.start));
        assert!(filter.contains(filter.end));
        assert!(!filter.contains(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
    }

    #[test]
    fn flow_filter_kinds() {
        assert_eq!(FlowFilter::Both.kinds(), &[FlowKind::Expense, FlowKind::Income]);
        assert!(!FlowFilter::Income.includes(FlowKind::Expense));
        assert_eq!("both".parse::<FlowFilter>(), Ok(FlowFilter::Both));
        assert_eq!("expense".parse::<FlowFilter>(), Ok(FlowFilter::Expense));
    }
}
