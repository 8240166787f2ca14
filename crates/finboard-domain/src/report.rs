//! Report-level structures handed to presentation and narrative layers.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    common::{Bucketing, FlowKind},
    entry::CategoryKey,
    filter::ReportFilter,
    transaction::Transaction,
    warning::DataIntegrityWarning,
};

/// Summed amount for one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: CategoryKey,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonStatus {
    WithinBudget,
    OverBudget,
    GoalMet,
    GoalShortfall,
}

impl ComparisonStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonStatus::WithinBudget => "within-budget",
            ComparisonStatus::OverBudget => "over-budget",
            ComparisonStatus::GoalMet => "goal-met",
            ComparisonStatus::GoalShortfall => "goal-shortfall",
        }
    }

    /// True for the statuses that call for attention.
    pub fn is_unfavourable(self) -> bool {
        matches!(
            self,
            ComparisonStatus::OverBudget | ComparisonStatus::GoalShortfall
        )
    }
}

impl fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Budgeted vs. actual figures for a single category (or the totals row).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub category: String,
    pub key: String,
    pub budgeted_amount: f64,
    pub actual_amount: f64,
    pub difference: f64,
    pub status: ComparisonStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utilization_percent: Option<f64>,
}

/// Explicit "nothing to compare" state for the given window, category and flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoDataCondition {
    pub filter: ReportFilter,
}

impl fmt::Display for NoDataCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no {} budgets or transactions between {} and {} (category: {})",
            self.filter.flow, self.filter.start, self.filter.end, self.filter.category
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum ComparisonOutcome {
    Compared {
        rows: Vec<ComparisonRow>,
        totals: ComparisonRow,
    },
    NoData(NoDataCondition),
}

impl ComparisonOutcome {
    pub fn is_no_data(&self) -> bool {
        matches!(self, ComparisonOutcome::NoData(_))
    }

    pub fn rows(&self) -> &[ComparisonRow] {
        match self {
            ComparisonOutcome::Compared { rows, .. } => rows,
            ComparisonOutcome::NoData(_) => &[],
        }
    }

    pub fn totals(&self) -> Option<&ComparisonRow> {
        match self {
            ComparisonOutcome::Compared { totals, .. } => Some(totals),
            ComparisonOutcome::NoData(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub bucket_start: NaiveDate,
    pub amount: f64,
}

/// One category's share of a section's grand total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub key: String,
    pub amount: f64,
    pub percent: f64,
}

/// Numeric facts a narrative generator can phrase; no text is produced here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectionSummary {
    pub grand_total: f64,
    pub entry_count: usize,
    pub transaction_count: usize,
    pub average_transaction: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_category: Option<CategoryShare>,
}

/// Everything computed for one flow kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportSection {
    pub kind: FlowKind,
    pub breakdown: Vec<CategoryShare>,
    pub comparison: ComparisonOutcome,
    pub trend: Vec<TimeSeriesPoint>,
    pub summary: SectionSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub filter: ReportFilter,
    pub bucketing: Bucketing,
    pub sections: Vec<ReportSection>,
    #[serde(default)]
    pub warnings: Vec<DataIntegrityWarning>,
}

impl Report {
    pub fn section(&self, kind: FlowKind) -> Option<&ReportSection> {
        self.sections.iter().find(|section| section.kind == kind)
    }
}

/// Result of assembling a report: either a report or the explicit no-data sentinel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum ReportOutcome {
    Ready(Report),
    NoData(NoDataCondition),
}

impl ReportOutcome {
    pub fn report(&self) -> Option<&Report> {
        match self {
            ReportOutcome::Ready(report) => Some(report),
            ReportOutcome::NoData(_) => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, ReportOutcome::NoData(_))
    }
}

/// One page of transactions returned by a store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub items: Vec<Transaction>,
    pub total_count: usize,
}
